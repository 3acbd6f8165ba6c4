//! WGSL kernel and dispatch for the square matrix product.

use bytemuck::{Pod, Zeroable};

use crate::context::GpuContext;
use crate::error::{GpuError, Result};
use crate::memory::GpuMatrix;

/// WGSL shader source.
const SHADER_SOURCE: &str = include_str!("../shaders/matmul.wgsl");

/// Kernel entry point.
const ENTRY_POINT: &str = "matmul_f32";

/// Uniform parameters bound alongside the matrices (binding 3).
///
/// Padded to 16 bytes; the shader only reads `n`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct GemmParams {
    n: u32,
    _pad: [u32; 3],
}

/// Execute the product kernel: `c = a * b`.
///
/// Builds the compute pipeline with a bind-group layout derived from the
/// shader, binds A/B/Out to slots 0-2 and the dimension uniform to slot 3,
/// and submits a single compute pass covering the whole output matrix.
pub async fn launch_gemm(
    ctx: &GpuContext,
    a: &GpuMatrix,
    b: &GpuMatrix,
    c: &GpuMatrix,
) -> Result<()> {
    let n = c.dim();
    let device = ctx.device();

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sqgemm shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    });
    if let Some(e) = device.pop_error_scope().await {
        return Err(GpuError::ShaderCompilation(e.to_string()));
    }

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("sqgemm pipeline"),
        layout: None,
        module: &module,
        entry_point: Some(ENTRY_POINT),
        compilation_options: Default::default(),
        cache: None,
    });
    if let Some(e) = device.pop_error_scope().await {
        return Err(GpuError::PipelineCreation(e.to_string()));
    }

    let params = GemmParams {
        n: n as u32,
        _pad: [0; 3],
    };
    let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sqgemm params"),
        size: std::mem::size_of::<GemmParams>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    ctx.queue()
        .write_buffer(&params_buffer, 0, bytemuck::bytes_of(&params));

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sqgemm bind group"),
        layout: &pipeline.get_bind_group_layout(0),
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: a.buffer().as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: b.buffer().as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: c.buffer().as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: params_buffer.as_entire_binding(),
            },
        ],
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("sqgemm dispatch"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("sqgemm pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        let (groups_x, groups_y) = GpuContext::workgroup_counts(n);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }
    ctx.queue().submit(std::iter::once(encoder.finish()));

    log::debug!("dispatched {n}x{n} product");
    Ok(())
}
