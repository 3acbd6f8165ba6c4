//! Owned square matrix type.

use std::ops::{Index, IndexMut};

use crate::codec;
use crate::error::{Result, ShapeError};

/// Dense square matrix of `f32` values.
///
/// Values are stored flat in **row-major** order: element (i, j) lives at
/// index `i * dim + j`. The flat layout is exactly the wire format uploaded
/// to the accelerator, so no conversion happens at the device boundary.
///
/// Use factory methods to create matrices:
///
/// ```
/// use sqgemm::SquareMat;
///
/// let zeros = SquareMat::zeros(3);
/// let identity = SquareMat::identity(3);
/// let custom = SquareMat::from_fn(2, |i, j| (i + j) as f32);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMat {
    data: Vec<f32>,
    dim: usize,
}

impl SquareMat {
    /// Create a matrix filled with zeros.
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim * dim],
            dim,
        }
    }

    /// Create an identity matrix: ones on the diagonal, zeros elsewhere.
    pub fn identity(dim: usize) -> Self {
        let mut mat = Self::zeros(dim);
        for i in 0..dim {
            mat.data[i * dim + i] = 1.0;
        }
        mat
    }

    /// Create a matrix from a function called with (row, col) indices.
    pub fn from_fn<F>(dim: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let data = (0..dim * dim).map(|idx| f(idx / dim, idx % dim)).collect();
        Self { data, dim }
    }

    /// Create a matrix from flat row-major data.
    ///
    /// ```
    /// use sqgemm::SquareMat;
    ///
    /// let m = SquareMat::from_row_major(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_row_major(data: &[f32], dim: usize) -> Result<Self> {
        Self::from_vec(data.to_vec(), dim)
    }

    /// Create a matrix from an owned flat row-major vector.
    pub fn from_vec(data: Vec<f32>, dim: usize) -> Result<Self> {
        if data.len() != dim * dim {
            return Err(ShapeError::DimensionMismatch(format!(
                "expected {} elements for a {dim}x{dim} matrix, got {}",
                dim * dim,
                data.len()
            )));
        }
        Ok(Self { data, dim })
    }

    /// Create a matrix from rows of cells, as supplied by a UI layer.
    ///
    /// Fails if the rows do not form a square matrix.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let dim = rows.len();
        let data = codec::flatten(rows)?;
        Ok(Self { data, dim })
    }

    /// Matrix dimension N (the matrix is N×N).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The flat row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The flat row-major data, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at position (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.dim + j]
    }

    /// Convert back to rows of cells.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        codec::reconstruct(&self.data, self.dim).expect("matrix data matches its dimension")
    }
}

impl Index<(usize, usize)> for SquareMat {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        &self.data[i * self.dim + j]
    }
}

impl IndexMut<(usize, usize)> for SquareMat {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        &mut self.data[i * self.dim + j]
    }
}
