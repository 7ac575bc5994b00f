use image::Rgb32FImage;
use wgpu::{Adapter, Backends, BindGroupLayout, Device, Instance, InstanceDescriptor, Queue};

use super::buffers::{create_compute_bindgroup_layout, DataBuffers, GpuParams};
use super::camera::OrthoCamera;
use super::config::validate_dimensions;
use super::error::RenderError;
use super::renderer::Tracer;
use super::scene::RenderScene;

const WORKGROUP_SIZE: u32 = 8;

/// Runs the per-pixel scan as a wgpu compute shader, one invocation per pixel.
///
/// The kernel follows the CPU code operation for operation, but `sqrt` on a
/// device is not required to be correctly rounded, so pixels sitting exactly
/// on a silhouette may differ from the CPU tracers.
pub struct GpuTracer {
    device: Device,
    queue: Queue,
    compute_pipeline: wgpu::ComputePipeline,
    bind_group_layout: BindGroupLayout,
}

impl GpuTracer {
    pub fn new() -> Result<GpuTracer, RenderError> {
        pollster::block_on(Self::init())
    }

    async fn init() -> Result<GpuTracer, RenderError> {
        let instance = generate_instance();
        let adapter = create_adapter(&instance).await?;

        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = generate_device_and_queue(&adapter).await?;

        let compute_module =
            device.create_shader_module(wgpu::include_wgsl!("compute_shader.wgsl"));

        let bind_group_layout = create_compute_bindgroup_layout(&device);

        let compute_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Compute Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Compute Pipeline"),
            layout: Some(&compute_pipeline_layout),
            module: &compute_module,
            entry_point: "main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        Ok(GpuTracer {
            device,
            queue,
            compute_pipeline,
            bind_group_layout,
        })
    }

    fn read_back(&self, buffers: &DataBuffers) -> Result<Vec<f32>, RenderError> {
        let buffer_slice = buffers.staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });

        // the only synchronisation point: wait for the dispatch and the copy
        self.device.poll(wgpu::Maintain::Wait);
        receiver.recv().map_err(|_| RenderError::ReadbackLost)??;

        let pixel_colors = {
            let data = buffer_slice.get_mapped_range();
            bytemuck::cast_slice::<u8, f32>(&data).to_vec()
        };
        buffers.staging_buffer.unmap();

        Ok(pixel_colors)
    }
}

impl Tracer for GpuTracer {
    fn name(&self) -> &str {
        "gpu"
    }

    fn trace(
        &self,
        scene: &RenderScene,
        camera: &OrthoCamera,
        width: u32,
        height: u32,
    ) -> Result<Rgb32FImage, RenderError> {
        validate_dimensions(width, height)?;

        let params = GpuParams::new(camera, width, height, scene.spheres.len() as u32);
        let buffers = DataBuffers::new(&self.device, params, &scene.spheres);
        let compute_bind_group =
            buffers.create_compute_bindgroup(&self.device, &self.bind_group_layout);

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Trace Encoder"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Trace Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.compute_pipeline);
            compute_pass.set_bind_group(0, &compute_bind_group, &[]);
            compute_pass.dispatch_workgroups(
                width.div_ceil(WORKGROUP_SIZE),
                height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        encoder.copy_buffer_to_buffer(
            &buffers.output_buffer,
            0,
            &buffers.staging_buffer,
            0,
            buffers.output_buffer_size,
        );

        self.queue.submit(Some(encoder.finish()));

        let pixel_colors = self.read_back(&buffers)?;
        let expected = width as usize * height as usize * 3;
        let actual = pixel_colors.len();

        Rgb32FImage::from_raw(width, height, pixel_colors)
            .ok_or(RenderError::BufferSize { expected, actual })
    }
}

fn generate_instance() -> Instance {
    wgpu::Instance::new(InstanceDescriptor {
        backends: Backends::all(),
        ..Default::default()
    })
}

async fn create_adapter(instance: &Instance) -> Result<Adapter, RenderError> {
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            // nothing is presented, the image is read back
            compatible_surface: None,
        })
        .await
        .ok_or(RenderError::NoAdapter)
}

async fn generate_device_and_queue(adapter: &Adapter) -> Result<(Device, Queue), RenderError> {
    let adapter_limits = wgpu::Limits {
        max_storage_buffer_binding_size: adapter.limits().max_storage_buffer_binding_size,
        max_buffer_size: adapter.limits().max_buffer_size,
        ..wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits())
    };

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Trace Device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter_limits,
            },
            None,
        )
        .await?;

    Ok((device, queue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::define_scene::define_render_scene;
    use crate::renderer::SequentialTracer;

    #[test]
    #[ignore = "requires GPU"]
    fn gpu_matches_cpu() {
        let scene = define_render_scene(&RenderConfig {
            num_spheres: 64,
            ..RenderConfig::default()
        });
        let camera = OrthoCamera::default();

        let tracer = GpuTracer::new().expect("gpu setup");

        let gpu = tracer.trace(&scene, &camera, 100, 60).expect("gpu trace");
        let cpu = SequentialTracer.trace(&scene, &camera, 100, 60).expect("cpu trace");

        // allow a few silhouette pixels to flip on devices with inexact sqrt
        let differing = gpu
            .pixels()
            .zip(cpu.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(differing <= 10, "{differing} pixels differ");
    }
}
