//! Host-side core for square matrix products.
//!
//! This crate provides the data types shared by every backend: a dense
//! square `f32` matrix, the row-major codec that converts between
//! rows-of-cells input and the flat buffer exchanged with an accelerator,
//! and a scalar reference product used as ground truth.
//!
//! # Quick Start
//!
//! ```
//! use sqgemm::{matmul_cpu, SquareMat};
//!
//! let a = SquareMat::identity(4);
//! let b = SquareMat::from_fn(4, |i, j| (i * 4 + j + 1) as f32);
//!
//! let c = matmul_cpu(&a, &b).unwrap();
//! assert_eq!(c, b);
//! ```
//!
//! For GPU-accelerated products, see the `sqgemm-wgpu` crate.

pub mod codec;
pub mod cpu;
pub mod mat;

mod error;

pub use codec::{flatten, reconstruct};
pub use cpu::matmul_cpu;
pub use error::{Result, ShapeError};
pub use mat::SquareMat;
