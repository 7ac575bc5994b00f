//! Orthographic ray tracer for a seeded field of spheres.
//!
//! One ray per pixel is cast along +Z and tested against every sphere in
//! index order. The per-pixel work can run on one thread
//! ([`SequentialTracer`]), on a rayon pool ([`ParallelTracer`]) or as a wgpu
//! compute shader ([`GpuTracer`]); the CPU tracers produce identical buffers.

pub mod buffers;
pub mod camera;
pub mod config;
pub mod define_scene;
pub mod error;
pub mod gpu;
pub mod image_output;
pub mod random;
pub mod renderer;
pub mod scene;
pub mod sphere;

pub use camera::{OrthoCamera, Ray};
pub use config::{Backend, RenderConfig};
pub use define_scene::{define_render_scene, generate_spheres};
pub use error::RenderError;
pub use gpu::GpuTracer;
pub use random::{GlibcRand, MsvcRand, RngKind, UniformSource};
pub use renderer::{create_tracer, per_pixel, trace_ray, ParallelTracer, SequentialTracer, Tracer};
pub use scene::{RenderScene, BACKGROUND_COLOR};
pub use sphere::{solve_quadratic, Sphere};
