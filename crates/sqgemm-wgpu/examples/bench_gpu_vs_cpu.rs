//! Wall-clock comparison of the GPU product against the scalar reference.
//!
//! For small matrices the submission and readback overhead dominates and the
//! CPU loop wins; the O(N^3) arithmetic lets the GPU catch up as N grows.

use std::time::Instant;

use rand::Rng;
use sqgemm::{matmul_cpu, SquareMat};
use sqgemm_wgpu::{gemm_gpu, GpuContext};

fn main() {
    env_logger::init();

    let ctx = match GpuContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("No usable GPU: {e}");
            std::process::exit(1);
        }
    };
    println!("GPU: {}", ctx.device_name());
    println!("Square matrix product, GPU vs CPU\n");

    let mut rng = rand::thread_rng();
    for n in [16usize, 64, 128, 256] {
        let a = SquareMat::from_fn(n, |_, _| rng.gen_range(0.0f32..1.0));
        let b = SquareMat::from_fn(n, |_, _| rng.gen_range(0.0f32..1.0));

        let start = Instant::now();
        let cpu = matmul_cpu(&a, &b).unwrap();
        let cpu_time = start.elapsed();

        let start = Instant::now();
        let gpu = pollster::block_on(gemm_gpu(&ctx, &a, &b)).unwrap();
        let gpu_time = start.elapsed();

        // Accumulation order matches the reference, but drivers may still
        // contract multiply-adds differently.
        let mut max_diff = 0.0f32;
        for i in 0..n {
            for j in 0..n {
                max_diff = max_diff.max((cpu[(i, j)] - gpu[(i, j)]).abs());
            }
        }
        assert!(max_diff < 1e-3, "max |cpu - gpu| = {max_diff}");

        println!("N = {n:>4}: CPU = {cpu_time:?}, GPU = {gpu_time:?}, max diff = {max_diff:.2e}");
    }
}
