use std::path::PathBuf;

use crate::error::RenderError;
use crate::random::RngKind;

// reference render settings
pub const IMAGE_WIDTH: u32 = 2048;
pub const IMAGE_HEIGHT: u32 = 2048;
pub const NUM_SPHERES: u32 = 512;
pub const SEED: u32 = 0x88e8_fff4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// single threaded loop over all pixels
    Sequential,
    /// rows spread over a rayon thread pool
    Parallel,
    /// one compute shader invocation per pixel
    Gpu,
}

/// Sphere tracer command line arguments.
#[derive(clap::Parser, Debug)]
#[clap(
    author,
    version,
    about = "Renders randomly generated spheres with an orthographic ray tracer."
)]
pub struct CliArgs {
    #[clap(long, default_value_t = IMAGE_WIDTH, help = "Output image width in pixels")]
    pub width: u32,

    #[clap(long, default_value_t = IMAGE_HEIGHT, help = "Output image height in pixels")]
    pub height: u32,

    #[clap(long, default_value_t = NUM_SPHERES, help = "Number of spheres to generate")]
    pub spheres: u32,

    #[clap(
        long,
        default_value = "0x88e8fff4",
        value_parser = parse_seed,
        help = "Scene seed, decimal or 0x-prefixed hex"
    )]
    pub seed: u32,

    #[clap(
        long,
        value_enum,
        default_value_t = RngKind::Msvc,
        help = "C runtime rand() to reproduce"
    )]
    pub rng: RngKind,

    #[clap(short, long, value_enum, default_value_t = Backend::Parallel)]
    pub backend: Backend,

    #[clap(
        long,
        default_value_t = 0,
        help = "Worker threads for the parallel backend [0 = all cores]"
    )]
    pub threads: usize,

    #[clap(short, long, default_value = "result.png", help = "Image file to write")]
    pub output: PathBuf,

    #[clap(short, long, help = "Use verbose output (log level = debug)")]
    pub verbose: bool,
}

fn parse_seed(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };

    parsed.map_err(|err| format!("invalid seed `{value}`: {err}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub num_spheres: u32,
    pub seed: u32,
    pub rng: RngKind,
    pub backend: Backend,
    pub threads: usize,
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            image_width: IMAGE_WIDTH,
            image_height: IMAGE_HEIGHT,
            num_spheres: NUM_SPHERES,
            seed: SEED,
            rng: RngKind::Msvc,
            backend: Backend::Parallel,
            threads: 0,
            output: PathBuf::from("result.png"),
        }
    }
}

impl From<CliArgs> for RenderConfig {
    fn from(args: CliArgs) -> Self {
        RenderConfig {
            image_width: args.width,
            image_height: args.height,
            num_spheres: args.spheres,
            seed: args.seed,
            rng: args.rng,
            backend: args.backend,
            threads: args.threads,
            output: args.output,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        validate_dimensions(self.image_width, self.image_height)
    }
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_reference_render() {
        let args = CliArgs::parse_from(["sphere_trace"]);
        let config = RenderConfig::from(args);

        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.seed, 0x88e8fff4);
    }

    #[test]
    fn seed_accepts_hex_and_decimal() {
        assert_eq!(parse_seed("0x10"), Ok(16));
        assert_eq!(parse_seed("0XfF"), Ok(255));
        assert_eq!(parse_seed("42"), Ok(42));
        assert!(parse_seed("0xzz").is_err());
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn command_line_overrides() {
        let args = CliArgs::parse_from([
            "sphere_trace",
            "--width",
            "64",
            "--height",
            "32",
            "--spheres",
            "3",
            "--seed",
            "7",
            "--rng",
            "glibc",
            "--backend",
            "sequential",
            "-o",
            "out.exr",
        ]);
        let config = RenderConfig::from(args);

        assert_eq!(config.image_width, 64);
        assert_eq!(config.image_height, 32);
        assert_eq!(config.num_spheres, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.rng, RngKind::Glibc);
        assert_eq!(config.backend, Backend::Sequential);
        assert_eq!(config.output, PathBuf::from("out.exr"));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = RenderConfig {
            image_height: 0,
            ..RenderConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidDimensions {
                width: 2048,
                height: 0
            })
        ));
    }
}
