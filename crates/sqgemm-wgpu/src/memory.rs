//! GPU memory management for matrices.

use crate::context::GpuContext;
use crate::error::{GpuError, Result};
use sqgemm::SquareMat;

/// A square matrix stored in GPU memory.
///
/// The buffer holds the flat row-major data of one [`SquareMat`]. Buffers
/// are owned by the operation that created them and dropped with it; nothing
/// is pooled or reused across products.
pub struct GpuMatrix {
    buffer: wgpu::Buffer,
    dim: usize,
}

impl GpuMatrix {
    /// Upload a host matrix into a read-only storage buffer.
    ///
    /// The buffer is created zeroed and the upload is enqueued on the device
    /// queue without waiting for completion; the queue orders it before any
    /// later submission that reads the buffer.
    pub async fn from_host(ctx: &GpuContext, mat: &SquareMat) -> Result<Self> {
        let gpu = Self::alloc(
            ctx,
            mat.dim(),
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            Some("sqgemm input"),
        )
        .await?;
        ctx.queue()
            .write_buffer(&gpu.buffer, 0, bytemuck::cast_slice(mat.as_slice()));
        Ok(gpu)
    }

    /// Allocate a zeroed output buffer the kernel writes and a copy reads.
    pub async fn alloc_output(ctx: &GpuContext, dim: usize) -> Result<Self> {
        Self::alloc(
            ctx,
            dim,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            Some("sqgemm output"),
        )
        .await
    }

    async fn alloc(
        ctx: &GpuContext,
        dim: usize,
        usage: wgpu::BufferUsages,
        label: wgpu::Label<'_>,
    ) -> Result<Self> {
        let size = byte_size(dim);
        let buffer = create_buffer_checked(ctx, size, usage, label).await?;
        Ok(Self { buffer, dim })
    }

    /// Matrix dimension N.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Buffer capacity in bytes.
    pub fn size_bytes(&self) -> u64 {
        byte_size(self.dim)
    }

    /// Get the underlying wgpu buffer (for bind groups).
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Copy the device data back to host memory.
    ///
    /// A storage buffer the kernel writes cannot itself be host-mapped, so
    /// the data is first copied into a mappable staging buffer. The staging
    /// buffer is mapped asynchronously, its bytes are copied out, and it is
    /// unmapped before this function returns.
    pub async fn to_host(&self, ctx: &GpuContext) -> Result<Vec<f32>> {
        let size = self.size_bytes();
        let staging = create_buffer_checked(
            ctx,
            size,
            wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            Some("sqgemm staging"),
        )
        .await?;

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sqgemm readback"),
            });
        encoder.copy_buffer_to_buffer(&self.buffer, 0, &staging, 0, size);
        ctx.queue().submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        ctx.device().poll(wgpu::Maintain::Wait);

        match receiver.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(GpuError::Map(e)),
            // Callback dropped without firing: the device went away.
            Err(_) => return Err(GpuError::DeviceLost),
        }

        let data = slice.get_mapped_range();
        let result: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        staging.unmap();

        log::debug!("read back {size} bytes from staging buffer");
        Ok(result)
    }
}

/// Create a buffer, surfacing device-side rejection as [`GpuError::Allocation`].
///
/// wgpu reports allocation failure through error scopes rather than a
/// fallible `create_buffer`.
async fn create_buffer_checked(
    ctx: &GpuContext,
    size: u64,
    usage: wgpu::BufferUsages,
    label: wgpu::Label<'_>,
) -> Result<wgpu::Buffer> {
    ctx.device()
        .push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    let buffer = ctx.device().create_buffer(&wgpu::BufferDescriptor {
        label,
        size,
        usage,
        mapped_at_creation: false,
    });
    if let Some(e) = ctx.device().pop_error_scope().await {
        return Err(GpuError::Allocation {
            size,
            reason: e.to_string(),
        });
    }
    Ok(buffer)
}

fn byte_size(dim: usize) -> u64 {
    (dim * dim * std::mem::size_of::<f32>()) as u64
}
