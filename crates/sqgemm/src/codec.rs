//! Row-major codec between rows-of-cells matrices and flat device buffers.
//!
//! The flat buffer is the wire format exchanged with the accelerator:
//! `flat[r * n + c] == rows[r][c]`. Both directions are float-to-float
//! identity copies, so [`reconstruct`] is the exact inverse of [`flatten`].

use crate::error::{Result, ShapeError};

/// Flatten a square rows-of-cells matrix into row-major order.
///
/// Fails if any row's length differs from the number of rows.
pub fn flatten(rows: &[Vec<f32>]) -> Result<Vec<f32>> {
    let dim = rows.len();
    let mut flat = Vec::with_capacity(dim * dim);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(ShapeError::DimensionMismatch(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                dim
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(flat)
}

/// Rebuild a rows-of-cells matrix from a flat row-major buffer.
///
/// Fails if the buffer does not hold exactly `dim * dim` elements.
pub fn reconstruct(flat: &[f32], dim: usize) -> Result<Vec<Vec<f32>>> {
    if flat.len() != dim * dim {
        return Err(ShapeError::DimensionMismatch(format!(
            "expected {} elements for a {dim}x{dim} matrix, got {}",
            dim * dim,
            flat.len()
        )));
    }
    Ok((0..dim)
        .map(|r| flat[r * dim..(r + 1) * dim].to_vec())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_layout() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let flat = flatten(&rows).unwrap();
        // flat[r * n + c] == rows[r][c]
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_round_trip_exact() {
        let rows = vec![
            vec![0.5, -1.25, 3.0],
            vec![f32::MIN_POSITIVE, 0.0, 1e30],
            vec![-7.0, 2.5, 0.125],
        ];
        let flat = flatten(&rows).unwrap();
        let back = reconstruct(&flat, 3).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_flatten_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]];
        assert!(flatten(&rows).is_err());
    }

    #[test]
    fn test_reconstruct_wrong_length() {
        assert!(reconstruct(&[1.0, 2.0, 3.0], 2).is_err());
    }

    #[test]
    fn test_empty() {
        let flat = flatten(&[]).unwrap();
        assert!(flat.is_empty());
        assert!(reconstruct(&flat, 0).unwrap().is_empty());
    }
}
