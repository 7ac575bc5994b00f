use thiserror::Error;

/// Failures of the collaborators around the tracer: device setup, thread
/// pools and image encoding. Tracing itself cannot fail.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image size {width}x{height}, both dimensions must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No compatible GPU adapter found")]
    NoAdapter,

    #[error("Failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Buffer mapping failed: {0}")]
    BufferMapping(#[from] wgpu::BufferAsyncError),

    #[error("GPU readback finished without reporting a result")]
    ReadbackLost,

    #[error("output buffer holds {actual} floats, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
