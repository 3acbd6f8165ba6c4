//! Error types for wgpu operations.

use thiserror::Error;

/// Errors that can occur during GPU operations.
#[derive(Debug, Error)]
pub enum GpuError {
    /// No GPU backend is present on this platform at all.
    #[error("no GPU backend available on this platform")]
    UnsupportedPlatform,

    /// Backends exist but no adapter satisfied the request.
    #[error("no suitable GPU adapter available")]
    NoAdapter,

    /// An adapter was found but the device could not be initialized.
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// The device rejected a buffer allocation.
    #[error("failed to allocate a {size}-byte buffer: {reason}")]
    Allocation { size: u64, reason: String },

    /// Shader source failed to compile.
    #[error("shader compilation error: {0}")]
    ShaderCompilation(String),

    /// Failed to create the compute pipeline.
    #[error("failed to create compute pipeline: {0}")]
    PipelineCreation(String),

    /// Host-visible mapping of the staging buffer was denied.
    #[error("failed to map staging buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),

    /// The device was lost while waiting for a buffer mapping.
    #[error("device lost while waiting for buffer mapping")]
    DeviceLost,

    /// Dimension mismatch.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for GPU operations.
pub type Result<T> = std::result::Result<T, GpuError>;
