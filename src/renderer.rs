use glam::Vec3;
use image::{ImageBuffer, Rgb, Rgb32FImage};
use rayon::prelude::*;

use super::camera::{OrthoCamera, Ray};
use super::config::{validate_dimensions, Backend};
use super::error::RenderError;
use super::gpu::GpuTracer;
use super::scene::{RenderScene, BACKGROUND_COLOR};
use super::sphere::Sphere;

/// Scans every sphere in index order and returns the index of the last one
/// the ray accepted. `ray.max_t` ends up at that hit's distance.
pub fn trace_ray(spheres: &[Sphere], ray: &mut Ray) -> Option<usize> {
    let mut hit_index = None;

    for (sphere_index, sphere) in spheres.iter().enumerate() {
        if sphere.intersect(ray) {
            hit_index = Some(sphere_index);
        }
    }

    hit_index
}

pub fn per_pixel(
    scene: &RenderScene,
    camera: &OrthoCamera,
    i: u32,
    j: u32,
    width: u32,
    height: u32,
) -> Vec3 {
    let mut ray = camera.ray_for_pixel(i, j, width, height);

    // a hit on sphere 0 falls through to the background, the reference
    // output depends on it
    match trace_ray(&scene.spheres, &mut ray) {
        Some(sphere_index) if sphere_index > 0 => scene.spheres[sphere_index].color,
        _ => BACKGROUND_COLOR,
    }
}

/// Maps [`per_pixel`] over a whole image. Every implementation writes each
/// pixel exactly once into a row-major RGB float buffer.
pub trait Tracer {
    fn name(&self) -> &str;

    fn trace(
        &self,
        scene: &RenderScene,
        camera: &OrthoCamera,
        width: u32,
        height: u32,
    ) -> Result<Rgb32FImage, RenderError>;
}

#[derive(Debug, Default)]
pub struct SequentialTracer;

impl Tracer for SequentialTracer {
    fn name(&self) -> &str {
        "sequential"
    }

    fn trace(
        &self,
        scene: &RenderScene,
        camera: &OrthoCamera,
        width: u32,
        height: u32,
    ) -> Result<Rgb32FImage, RenderError> {
        validate_dimensions(width, height)?;

        let image = ImageBuffer::from_fn(width, height, |i, j| {
            Rgb(per_pixel(scene, camera, i, j, width, height).to_array())
        });

        Ok(image)
    }
}

#[derive(Debug)]
pub struct ParallelTracer {
    thread_pool: rayon::ThreadPool,
}

impl ParallelTracer {
    /// `threads == 0` lets rayon pick one worker per core.
    pub fn new(threads: usize) -> Result<ParallelTracer, RenderError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("trace-{index}"))
            .build()?;

        log::debug!("trace pool running {} threads", thread_pool.current_num_threads());

        Ok(ParallelTracer { thread_pool })
    }
}

impl Tracer for ParallelTracer {
    fn name(&self) -> &str {
        "parallel"
    }

    fn trace(
        &self,
        scene: &RenderScene,
        camera: &OrthoCamera,
        width: u32,
        height: u32,
    ) -> Result<Rgb32FImage, RenderError> {
        validate_dimensions(width, height)?;

        let mut image = Rgb32FImage::new(width, height);
        let row_len = width as usize * 3;

        // each task owns one row of the output, rows never overlap
        let pixels: &mut [f32] = &mut image;
        self.thread_pool.install(|| {
            pixels
                .par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(j, row)| {
                    for (i, pixel) in row.chunks_exact_mut(3).enumerate() {
                        let color = per_pixel(scene, camera, i as u32, j as u32, width, height);
                        pixel.copy_from_slice(&color.to_array());
                    }
                });
        });

        Ok(image)
    }
}

pub fn create_tracer(backend: Backend, threads: usize) -> Result<Box<dyn Tracer>, RenderError> {
    let tracer: Box<dyn Tracer> = match backend {
        Backend::Sequential => Box::new(SequentialTracer),
        Backend::Parallel => Box::new(ParallelTracer::new(threads)?),
        Backend::Gpu => Box::new(GpuTracer::new()?),
    };

    Ok(tracer)
}
