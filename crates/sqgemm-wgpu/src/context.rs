//! wgpu context and device management.

use crate::error::{GpuError, Result};

/// Side length of one execution tile. Must match the shader's
/// `@workgroup_size` attribute.
pub const WORKGROUP_SIZE: u32 = 8;

/// wgpu context for square GEMM operations.
///
/// Holds the device and its command queue. A context may be shared across
/// calls; every product still creates its own buffers and pipeline, so only
/// the immutable device/queue pair is shared between concurrent products.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_name: String,
}

impl GpuContext {
    /// Acquire a device on the best available adapter, blocking.
    pub fn new() -> Result<Self> {
        pollster::block_on(Self::new_async())
    }

    /// Acquire a device on the best available adapter.
    pub async fn new_async() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => {
                // Distinguish "no backend at all" from "backends exist but
                // none satisfied the request".
                let any = !instance.enumerate_adapters(wgpu::Backends::all()).is_empty();
                return Err(if any {
                    GpuError::NoAdapter
                } else {
                    GpuError::UnsupportedPlatform
                });
            }
        };

        let adapter_name = adapter.get_info().name;
        log::debug!("acquired adapter: {adapter_name}");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("sqgemm device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        Ok(Self {
            device,
            queue,
            adapter_name,
        })
    }

    /// Get the underlying wgpu device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Get the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Name of the adapter the device was created on.
    pub fn device_name(&self) -> &str {
        &self.adapter_name
    }

    /// Workgroup counts per grid dimension for an n×n product.
    pub fn workgroup_counts(n: usize) -> (u32, u32) {
        let groups = (n as u32 + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
        (groups, groups)
    }
}
