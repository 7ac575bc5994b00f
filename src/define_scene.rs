use glam::vec3;

use super::config::RenderConfig;
use super::random::UniformSource;
use super::scene::RenderScene;
use super::sphere::Sphere;

/// Draws `count` spheres from `source`, seven values per sphere.
///
/// The draw order (center x, y, z, radius, r, g, b) is part of the output:
/// changing it changes the rendered image.
pub fn generate_spheres(source: &mut dyn UniformSource, count: u32) -> Vec<Sphere> {
    (0..count)
        .map(|_| {
            let cx = source.next_unit() * 20.0 - 10.0;
            let cy = source.next_unit() * 20.0 - 10.0;
            let cz = source.next_unit() * 20.0 - 5.0;
            let radius = (source.next_unit() + 0.1) * 1.5;
            let r = source.next_unit();
            let g = source.next_unit();
            let b = source.next_unit();

            Sphere::new(vec3(cx, cy, cz), radius, vec3(r, g, b))
        })
        .collect()
}

pub fn define_render_scene(config: &RenderConfig) -> RenderScene {
    let mut source = config.rng.seeded(config.seed);
    let spheres = generate_spheres(source.as_mut(), config.num_spheres);

    log::debug!(
        "generated {} spheres from seed {:#x} ({:?})",
        spheres.len(),
        config.seed,
        config.rng
    );

    RenderScene::new(spheres)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{GlibcRand, MsvcRand, RngKind};

    #[test]
    fn same_seed_gives_same_scene() {
        for rng in [RngKind::Msvc, RngKind::Glibc] {
            let config = RenderConfig {
                rng,
                ..RenderConfig::default()
            };

            let first = define_render_scene(&config);
            let second = define_render_scene(&config);

            assert_eq!(first.spheres.len(), 512);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn different_seeds_give_different_scenes() {
        let mut a = MsvcRand::new(1);
        let mut b = MsvcRand::new(2);

        assert_ne!(generate_spheres(&mut a, 8), generate_spheres(&mut b, 8));
    }

    #[test]
    fn first_sphere_follows_field_order() {
        let mut source = MsvcRand::new(0x88e8_fff4);
        let spheres = generate_spheres(&mut source, 1);

        // first seven outputs of the reference seed
        let u = |n: u32| n as f32 / MsvcRand::RAND_MAX as f32;
        let sphere = spheres[0];
        assert_eq!(sphere.center.x, u(18756) * 20.0 - 10.0);
        assert_eq!(sphere.center.y, u(7811) * 20.0 - 10.0);
        assert_eq!(sphere.center.z, u(10497) * 20.0 - 5.0);
        assert_eq!(sphere.radius, (u(17222) + 0.1) * 1.5);
        assert_eq!(sphere.color.x, u(32237));
        assert_eq!(sphere.color.y, u(19845));
        assert_eq!(sphere.color.z, u(19525));
    }

    #[test]
    fn generated_fields_stay_in_range() {
        let mut source = GlibcRand::new(0x88e8_fff4);
        for sphere in generate_spheres(&mut source, 1000) {
            assert!((-10.0..=10.0).contains(&sphere.center.x));
            assert!((-10.0..=10.0).contains(&sphere.center.y));
            assert!((-5.0..=15.0).contains(&sphere.center.z));
            assert!((0.149..=1.651).contains(&sphere.radius));
            for channel in sphere.color.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn zero_count_gives_empty_scene() {
        let mut source = MsvcRand::new(7);
        assert!(generate_spheres(&mut source, 0).is_empty());
    }
}
