//! Scalar reference implementation of the matrix product.

use crate::error::{Result, ShapeError};
use crate::mat::SquareMat;

/// Compute `C = A * B` with plain scalar arithmetic.
///
/// The inner sum runs over k in ascending order, matching the GPU kernel's
/// accumulation order, so both paths round identically for the same inputs.
pub fn matmul_cpu(a: &SquareMat, b: &SquareMat) -> Result<SquareMat> {
    if a.dim() != b.dim() {
        return Err(ShapeError::DimensionMismatch(format!(
            "A is {0}x{0}, B is {1}x{1}",
            a.dim(),
            b.dim()
        )));
    }

    let n = a.dim();
    let mut c = SquareMat::zeros(n);
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0f32;
            for k in 0..n {
                sum += a.get(i, k) * b.get(k, j);
            }
            c[(i, j)] = sum;
        }
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_cpu_2x2() {
        let a = SquareMat::from_row_major(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let b = SquareMat::from_row_major(&[5.0, 6.0, 7.0, 8.0], 2).unwrap();

        let c = matmul_cpu(&a, &b).unwrap();

        // [[1*5+2*7, 1*6+2*8], [3*5+4*7, 3*6+4*8]] = [[19, 22], [43, 50]]
        assert_eq!(c[(0, 0)], 19.0);
        assert_eq!(c[(0, 1)], 22.0);
        assert_eq!(c[(1, 0)], 43.0);
        assert_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    fn test_identity_law() {
        let i = SquareMat::identity(4);
        let b = SquareMat::from_fn(4, |r, c| (r * 4 + c + 1) as f32);

        assert_eq!(matmul_cpu(&i, &b).unwrap(), b);
        assert_eq!(matmul_cpu(&b, &i).unwrap(), b);
    }

    #[test]
    fn test_zero_annihilates() {
        let a = SquareMat::from_fn(3, |r, c| (r + c) as f32);
        let z = SquareMat::zeros(3);

        let c = matmul_cpu(&a, &z).unwrap();
        assert!(c.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = SquareMat::zeros(2);
        let b = SquareMat::zeros(3);
        assert!(matmul_cpu(&a, &b).is_err());
    }

    #[test]
    fn test_single_element() {
        let a = SquareMat::from_row_major(&[5.0], 1).unwrap();
        let b = SquareMat::from_row_major(&[3.0], 1).unwrap();
        assert_eq!(matmul_cpu(&a, &b).unwrap()[(0, 0)], 15.0);
    }
}
