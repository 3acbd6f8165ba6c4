//! Basic example: multiply two 4x4 matrices on the GPU.

use sqgemm::SquareMat;
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
    println!("Square GEMM - Basic Example");
    println!("GPU: {}\n", ctx.device_name());

    let a = SquareMat::identity(4);
    let b = SquareMat::from_fn(4, |i, j| (i * 4 + j + 1) as f32);

    println!("Matrix A (identity):");
    print_matrix(&a);

    println!("\nMatrix B (values 1..16):");
    print_matrix(&b);

    match pollster::block_on(gemm_gpu(&ctx, &a, &b)) {
        Ok(c) => {
            println!("\nResult C = A * B:");
            print_matrix(&c);
        }
        Err(e) => {
            eprintln!("GPU multiply failed: {e}");
            std::process::exit(1);
        }
    }

    println!("\nDone!");
}

fn print_matrix(m: &SquareMat) {
    for i in 0..m.dim() {
        print!("  ");
        for j in 0..m.dim() {
            print!("{:6.1} ", m[(i, j)]);
        }
        println!();
    }
}
