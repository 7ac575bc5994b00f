use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use sphere_trace::config::CliArgs;
use sphere_trace::image_output::save_image;
use sphere_trace::{create_tracer, define_render_scene, OrthoCamera, RenderConfig};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = RenderConfig::from(args);
    config.validate()?;

    let scene = define_render_scene(&config);
    let camera = OrthoCamera::default();

    let tracer = create_tracer(config.backend, config.threads)
        .with_context(|| format!("could not set up the {:?} backend", config.backend))?;

    log::info!(
        "tracing {} spheres at {}x{} on the {} backend",
        scene.spheres.len(),
        config.image_width,
        config.image_height,
        tracer.name()
    );

    let start = Instant::now();
    let image = tracer.trace(&scene, &camera, config.image_width, config.image_height)?;
    log::info!("Execution time {} ms", start.elapsed().as_millis());

    save_image(&image, &config.output)
        .with_context(|| format!("Can't create image file {}", config.output.display()))?;

    Ok(())
}
