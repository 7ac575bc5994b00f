use bytemuck::Zeroable;
use wgpu::{util::DeviceExt, BindGroup, BindGroupLayout, Buffer, Device};

use super::camera::OrthoCamera;
use super::sphere::Sphere;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuParams {
    pub image_width: u32,   // u32, aligned to 4 bytes
    pub image_height: u32,  // u32, aligned to 4 bytes
    pub sphere_count: u32,  // u32, aligned to 4 bytes
    pub _padding: [u8; 4],  // padding so the camera window starts at 16 bytes
    pub left: f32,          // f32, aligned to 4 bytes
    pub bottom: f32,        // f32, aligned to 4 bytes
    pub window_width: f32,  // f32, aligned to 4 bytes
    pub window_height: f32, // f32, aligned to 4 bytes
    pub near: f32,          // f32, aligned to 4 bytes
    pub far: f32,           // f32, aligned to 4 bytes
    pub _padding2: [u8; 8], // padding to ensure 16-byte alignment
}

impl GpuParams {
    pub fn new(camera: &OrthoCamera, width: u32, height: u32, sphere_count: u32) -> GpuParams {
        GpuParams {
            image_width: width,
            image_height: height,
            sphere_count,
            _padding: [0; 4],
            left: camera.left,
            bottom: camera.bottom,
            window_width: camera.width,
            window_height: camera.height,
            near: camera.near,
            far: camera.far,
            _padding2: [0; 8],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSphere {
    pub center: [f32; 3],  // vec3, aligned to 12 bytes
    pub radius: f32,       // f32, aligned to 4 bytes
    pub color: [f32; 3],   // vec3, aligned to 12 bytes
    pub _padding: [u8; 4], // padding to ensure 16-byte alignment
}

impl From<&Sphere> for GpuSphere {
    fn from(sphere: &Sphere) -> Self {
        GpuSphere {
            center: sphere.center.to_array(),
            radius: sphere.radius,
            color: sphere.color.to_array(),
            _padding: [0; 4],
        }
    }
}

macro_rules! bind_group_entry {
    ($binding:expr, $resource:expr) => {
        wgpu::BindGroupEntry {
            binding: $binding,
            resource: $resource.as_entire_binding(),
        }
    };
}

const PARAMS_BIND: u32 = 0;
const SPHERE_BIND: u32 = 1;
const PIXEL_COLORS_BIND: u32 = 2;

pub fn create_compute_bindgroup_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Trace Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: PARAMS_BIND,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: SPHERE_BIND,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: PIXEL_COLORS_BIND,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: false },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

/// Scene, parameter and output buffers for one trace.
pub struct DataBuffers {
    pub output_buffer_size: u64,
    pub params_buffer: Buffer,
    pub sphere_buffer: Buffer,
    pub output_buffer: Buffer,
    pub staging_buffer: Buffer,
}

impl DataBuffers {
    pub fn new(device: &Device, params: GpuParams, spheres: &[Sphere]) -> DataBuffers {
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Params Buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        // bindings can't be empty, an empty scene gets one zeroed sphere that
        // sphere_count keeps the kernel from reading
        let mut sphere_array: Vec<GpuSphere> = spheres.iter().map(GpuSphere::from).collect();
        if sphere_array.is_empty() {
            sphere_array.push(GpuSphere::zeroed());
        }

        let sphere_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Buffer"),
            contents: bytemuck::cast_slice(&sphere_array),
            usage: wgpu::BufferUsages::STORAGE,
        });

        // 3 f32 per pixel, RGB
        let output_buffer_size = params.image_width as u64
            * params.image_height as u64
            * std::mem::size_of::<[f32; 3]>() as u64;

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: output_buffer_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: output_buffer_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        DataBuffers {
            output_buffer_size,
            params_buffer,
            sphere_buffer,
            output_buffer,
            staging_buffer,
        }
    }

    pub fn create_compute_bindgroup(&self, device: &Device, layout: &BindGroupLayout) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                bind_group_entry!(PARAMS_BIND, self.params_buffer),
                bind_group_entry!(SPHERE_BIND, self.sphere_buffer),
                bind_group_entry!(PIXEL_COLORS_BIND, self.output_buffer),
            ],
            label: Some("Trace Bind Group"),
        })
    }
}
