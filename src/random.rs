//! Seeded uniform number sources reproducing C runtime `rand()` streams.
//!
//! The scene has to come out identical to the one the reference renderer
//! produced, so the generators below are bit-exact copies of the two common
//! C library implementations rather than anything from the `rand` family.

/// Source of uniform floats in `[0, 1]`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RngKind {
    /// Microsoft C runtime linear congruential generator
    Msvc,
    /// glibc `random_r` additive feedback generator
    Glibc,
}

impl RngKind {
    pub fn seeded(self, seed: u32) -> Box<dyn UniformSource> {
        match self {
            RngKind::Msvc => Box::new(MsvcRand::new(seed)),
            RngKind::Glibc => Box::new(GlibcRand::new(seed)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MsvcRand {
    state: u32,
}

impl MsvcRand {
    pub const RAND_MAX: u32 = 0x7fff;

    pub fn new(seed: u32) -> MsvcRand {
        MsvcRand { state: seed }
    }

    pub fn next_int(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(214_013).wrapping_add(2_531_011);
        (self.state >> 16) & Self::RAND_MAX
    }
}

impl UniformSource for MsvcRand {
    fn next_unit(&mut self) -> f32 {
        self.next_int() as f32 / Self::RAND_MAX as f32
    }
}

const GLIBC_DEGREE: usize = 31;
const GLIBC_SEPARATION: usize = 3;

#[derive(Debug, Clone)]
pub struct GlibcRand {
    state: [u32; GLIBC_DEGREE],
    front: usize,
    rear: usize,
}

impl GlibcRand {
    pub const RAND_MAX: u32 = 0x7fff_ffff;

    pub fn new(seed: u32) -> GlibcRand {
        let seed = if seed == 0 { 1 } else { seed };

        let mut state = [0u32; GLIBC_DEGREE];
        state[0] = seed;

        // state[i] = 16807 * state[i - 1] % (2^31 - 1), Schrage's method,
        // starting from the seed reinterpreted as a signed word
        let mut word = seed as i32 as i64;
        for slot in state.iter_mut().skip(1) {
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            *slot = word as u32;
        }

        let mut rand = GlibcRand {
            state,
            front: GLIBC_SEPARATION,
            rear: 0,
        };

        for _ in 0..GLIBC_DEGREE * 10 {
            rand.next_int();
        }

        rand
    }

    pub fn next_int(&mut self) -> u32 {
        let value = self.state[self.front].wrapping_add(self.state[self.rear]);
        self.state[self.front] = value;

        self.front = (self.front + 1) % GLIBC_DEGREE;
        self.rear = (self.rear + 1) % GLIBC_DEGREE;

        value >> 1
    }
}

impl UniformSource for GlibcRand {
    fn next_unit(&mut self) -> f32 {
        self.next_int() as f32 / Self::RAND_MAX as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msvc_matches_known_sequence() {
        let mut rand = MsvcRand::new(1);
        let values: Vec<u32> = (0..4).map(|_| rand.next_int()).collect();
        assert_eq!(values, [41, 18467, 6334, 26500]);
    }

    #[test]
    fn msvc_reference_seed() {
        let mut rand = MsvcRand::new(0x88e8_fff4);
        let values: Vec<u32> = (0..7).map(|_| rand.next_int()).collect();
        assert_eq!(values, [18756, 7811, 10497, 17222, 32237, 19845, 19525]);
    }

    #[test]
    fn glibc_matches_known_sequence() {
        let mut rand = GlibcRand::new(1);
        let values: Vec<u32> = (0..4).map(|_| rand.next_int()).collect();
        assert_eq!(values, [1804289383, 846930886, 1681692777, 1714636915]);
    }

    #[test]
    fn glibc_seed_zero_behaves_like_one() {
        let mut zero = GlibcRand::new(0);
        let mut one = GlibcRand::new(1);
        for _ in 0..100 {
            assert_eq!(zero.next_int(), one.next_int());
        }
    }

    #[test]
    fn glibc_reference_seed() {
        // seed has the sign bit set, which exercises the signed reseeding path
        let mut rand = GlibcRand::new(0x88e8_fff4);
        let values: Vec<u32> = (0..4).map(|_| rand.next_int()).collect();
        assert_eq!(values, [1126746263, 1184289434, 1587224398, 1960856955]);
    }

    #[test]
    fn unit_values_stay_in_range() {
        for kind in [RngKind::Msvc, RngKind::Glibc] {
            let mut source = kind.seeded(1234);
            for _ in 0..10_000 {
                let u = source.next_unit();
                assert!((0.0..=1.0).contains(&u), "{kind:?} produced {u}");
            }
        }
    }
}
