//! wgpu backend for square matrix multiplication.
//!
//! This crate computes `C = A * B` for dense square `f32` matrices on
//! whatever GPU the platform exposes through wgpu (Vulkan, Metal, DX12, GL).
//!
//! # Quick Start
//!
//! ```ignore
//! use sqgemm::SquareMat;
//! use sqgemm_wgpu::matmul_gpu;
//!
//! let a = SquareMat::identity(4);
//! let b = SquareMat::from_fn(4, |i, j| (i * 4 + j + 1) as f32);
//!
//! // One-shot API: acquires a device, computes, tears everything down.
//! let c = matmul_gpu(&a, &b)?;
//! ```
//!
//! # Persistent Context
//!
//! For repeated products, acquire the device once:
//!
//! ```ignore
//! use sqgemm_wgpu::{gemm_gpu, GpuContext};
//!
//! let ctx = GpuContext::new()?;
//! let c1 = pollster::block_on(gemm_gpu(&ctx, &a, &b))?;
//! let c2 = pollster::block_on(gemm_gpu(&ctx, &c1, &b))?;
//! ```
//!
//! Every call creates its own buffers, pipeline, and staging buffer; only
//! the immutable device/queue pair is shared, so independent products may be
//! issued concurrently without coordination.

mod context;
mod error;
mod kernels;
mod memory;

pub use context::{GpuContext, WORKGROUP_SIZE};
pub use error::{GpuError, Result};
pub use kernels::launch_gemm;
pub use memory::GpuMatrix;

use sqgemm::SquareMat;

// ============================================================================
// Helper: validate input shapes
// ============================================================================

fn validate_input(a: &SquareMat, b: &SquareMat) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(GpuError::DimensionMismatch(format!(
            "A is {0}x{0}, B is {1}x{1}",
            a.dim(),
            b.dim()
        )));
    }
    if a.dim() == 0 {
        // wgpu rejects zero-sized bindings.
        return Err(GpuError::DimensionMismatch(
            "matrix dimension must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// One-shot square matrix product on the GPU, blocking.
///
/// Acquires a device, uploads both inputs, dispatches the kernel, and reads
/// the result back. Every call performs the full acquire/compute/teardown
/// cycle and shares nothing with other calls; use [`gemm_gpu`] with a
/// [`GpuContext`] to amortize device acquisition.
pub fn matmul_gpu(a: &SquareMat, b: &SquareMat) -> Result<SquareMat> {
    pollster::block_on(matmul_gpu_async(a, b))
}

/// One-shot square matrix product on the GPU.
///
/// Inputs are validated before any device work, so a shape mismatch never
/// reaches the accelerator.
pub async fn matmul_gpu_async(a: &SquareMat, b: &SquareMat) -> Result<SquareMat> {
    validate_input(a, b)?;
    let ctx = GpuContext::new_async().await?;
    gemm_gpu(&ctx, a, b).await
}

/// Square matrix product with a persistent context.
///
/// Runs upload, dispatch, and readback on an already-acquired device. Either
/// a complete result matrix is returned or the call fails; no partial matrix
/// is ever produced.
pub async fn gemm_gpu(ctx: &GpuContext, a: &SquareMat, b: &SquareMat) -> Result<SquareMat> {
    validate_input(a, b)?;
    let n = a.dim();

    let a_gpu = GpuMatrix::from_host(ctx, a).await?;
    let b_gpu = GpuMatrix::from_host(ctx, b).await?;
    let c_gpu = GpuMatrix::alloc_output(ctx, n).await?;

    launch_gemm(ctx, &a_gpu, &b_gpu, &c_gpu).await?;

    let flat = c_gpu.to_host(ctx).await?;
    SquareMat::from_vec(flat, n).map_err(|e| GpuError::DimensionMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqgemm::matmul_cpu;

    /// Helper to check if a GPU is available.
    fn gpu_context_or_skip() -> Option<GpuContext> {
        match GpuContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                println!("GPU not available ({e}), skipping test");
                None
            }
        }
    }

    fn assert_matrices_close(got: &SquareMat, expected: &SquareMat, tol: f32) {
        assert_eq!(got.dim(), expected.dim());
        for i in 0..got.dim() {
            for j in 0..got.dim() {
                assert!(
                    (got[(i, j)] - expected[(i, j)]).abs() < tol,
                    "C[{i},{j}] = {}, expected {}",
                    got[(i, j)],
                    expected[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_matmul_gpu_small() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        let a = SquareMat::from_row_major(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let b = SquareMat::from_row_major(&[5.0, 6.0, 7.0, 8.0], 2).unwrap();

        let c = matmul_gpu(&a, &b).unwrap();

        // [[1*5+2*7, 1*6+2*8], [3*5+4*7, 3*6+4*8]] = [[19, 22], [43, 50]]
        assert!((c[(0, 0)] - 19.0).abs() < 1e-4, "C[0,0] = {}", c[(0, 0)]);
        assert!((c[(0, 1)] - 22.0).abs() < 1e-4, "C[0,1] = {}", c[(0, 1)]);
        assert!((c[(1, 0)] - 43.0).abs() < 1e-4, "C[1,0] = {}", c[(1, 0)]);
        assert!((c[(1, 1)] - 50.0).abs() < 1e-4, "C[1,1] = {}", c[(1, 1)]);
    }

    #[test]
    fn test_matmul_gpu_identity_left() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        // 4x4 identity times the values 1..16 leaves them unchanged.
        let a = SquareMat::identity(4);
        let b = SquareMat::from_fn(4, |i, j| (i * 4 + j + 1) as f32);

        let c = matmul_gpu(&a, &b).unwrap();
        assert_matrices_close(&c, &b, 1e-4);
    }

    #[test]
    fn test_matmul_gpu_identity_right() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        let a = SquareMat::from_fn(4, |i, j| (i * 4 + j + 1) as f32);
        let i = SquareMat::identity(4);

        let c = matmul_gpu(&a, &i).unwrap();
        assert_matrices_close(&c, &a, 1e-4);
    }

    #[test]
    fn test_matmul_gpu_zero_matrix() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        let a = SquareMat::from_fn(4, |i, j| (i + j) as f32);
        let z = SquareMat::zeros(4);

        let c = matmul_gpu(&a, &z).unwrap();
        assert_matrices_close(&c, &z, 1e-4);
    }

    #[test]
    fn test_matmul_gpu_dim_not_multiple_of_tile() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        // N=5 rounds the 8x8 grid up; out-of-range invocations must not
        // write, so all 25 cells still match the reference.
        let a = SquareMat::from_fn(5, |i, j| (i as f32) - (j as f32) * 0.5);
        let b = SquareMat::from_fn(5, |i, j| ((i * 5 + j) % 7) as f32);

        let c = matmul_gpu(&a, &b).unwrap();
        let expected = matmul_cpu(&a, &b).unwrap();
        assert_eq!(c.dim(), 5);
        assert_matrices_close(&c, &expected, 1e-4);
    }

    #[test]
    fn test_matmul_gpu_matches_cpu_13x13() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        let a = SquareMat::from_fn(13, |i, j| ((i * 13 + j) % 9) as f32 * 0.25);
        let b = SquareMat::from_fn(13, |i, j| ((i * 7 + j * 3) % 11) as f32 * 0.5);

        let c = matmul_gpu(&a, &b).unwrap();
        let expected = matmul_cpu(&a, &b).unwrap();
        assert_matrices_close(&c, &expected, 1e-4);
    }

    #[test]
    fn test_matmul_gpu_single_element() {
        if gpu_context_or_skip().is_none() {
            return;
        }

        let a = SquareMat::from_row_major(&[5.0], 1).unwrap();
        let b = SquareMat::from_row_major(&[3.0], 1).unwrap();

        let c = matmul_gpu(&a, &b).unwrap();
        assert!((c[(0, 0)] - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_gemm_gpu_context_reuse() {
        let ctx = match gpu_context_or_skip() {
            Some(ctx) => ctx,
            None => return,
        };

        let a = SquareMat::from_fn(8, |i, j| ((i + 2 * j) % 5) as f32);
        let i = SquareMat::identity(8);

        let c1 = pollster::block_on(gemm_gpu(&ctx, &a, &i)).unwrap();
        let c2 = pollster::block_on(gemm_gpu(&ctx, &c1, &i)).unwrap();

        assert_matrices_close(&c1, &a, 1e-4);
        assert_matrices_close(&c2, &a, 1e-4);
    }

    #[test]
    fn test_dimension_mismatch_before_device_work() {
        // Validation happens before device acquisition, so this test runs
        // even without a GPU.
        let a = SquareMat::zeros(2);
        let b = SquareMat::zeros(3);

        match matmul_gpu(&a, &b) {
            Err(GpuError::DimensionMismatch(_)) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let a = SquareMat::zeros(0);
        let b = SquareMat::zeros(0);

        match matmul_gpu(&a, &b) {
            Err(GpuError::DimensionMismatch(_)) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }
}
