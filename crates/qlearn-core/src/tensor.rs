//! Dense two-dimensional tensors
//!
//! A [`Tensor`] is a fixed-shape, row-major buffer of `f64` values. Every
//! operation returns a new tensor; the only in-place mutation is
//! [`Tensor::set`], which swaps the whole buffer for one of equal length.

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::{RLError, Result};

/// Fixed-shape 2-D numeric buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array2<f64>,
}

impl Tensor {
    /// Create a tensor from row-major data
    pub fn new(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let expected = shape.0 * shape.1;
        if data.len() != expected {
            return Err(RLError::dimension(expected, data.len()));
        }
        let data = Array2::from_shape_vec(shape, data)
            .map_err(|_| RLError::dimension(expected, expected))?;
        Ok(Self { data })
    }

    /// Tensor of zeros
    #[must_use]
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            data: Array2::zeros(shape),
        }
    }

    /// Square identity tensor
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    /// Column vector `(len, 1)` holding `values`
    #[must_use]
    pub fn column(values: &[f64]) -> Self {
        Self {
            data: Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i]),
        }
    }

    /// Build a tensor from a function of `(row, col)`
    pub fn from_fn<F>(shape: (usize, usize), f: F) -> Self
    where
        F: FnMut((usize, usize)) -> f64,
    {
        Self {
            data: Array2::from_shape_fn(shape, f),
        }
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for tensors with no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at row `i`, column `j`
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }

    /// Row-major copy of the data
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Replace the whole buffer in place. The length must not change.
    pub fn set(&mut self, data: Vec<f64>) -> Result<()> {
        *self = Self::new(self.shape(), data)?;
        Ok(())
    }

    fn same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(RLError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            })
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        self.same_shape(other)?;
        let data = Zip::from(&self.data)
            .and(&other.data)
            .map_collect(|&a, &b| f(a, b));
        Ok(Self { data })
    }

    /// Element-wise sum
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Add a scalar to every element
    #[must_use]
    pub fn add_scalar(&self, value: f64) -> Self {
        Self {
            data: self.data.mapv(|a| a + value),
        }
    }

    /// Element-wise difference
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Subtract a scalar from every element
    #[must_use]
    pub fn subtract_scalar(&self, value: f64) -> Self {
        Self {
            data: self.data.mapv(|a| a - value),
        }
    }

    /// Element-wise (Hadamard) product
    pub fn dot(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Multiply every element by a scalar
    #[must_use]
    pub fn dot_scalar(&self, value: f64) -> Self {
        Self {
            data: self.data.mapv(|a| a * value),
        }
    }

    /// Matrix product `(m, k) x (k, n) -> (m, n)`
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        let (m, k) = self.shape();
        let (rows, n) = other.shape();
        if k != rows {
            return Err(RLError::dimension(k, rows));
        }
        let data = Array2::from_shape_fn((m, n), |(i, j)| {
            let mut sum = 0.0;
            for p in 0..k {
                sum += self.data[[i, p]] * other.data[[p, j]];
            }
            sum
        });
        Ok(Self { data })
    }

    /// Transposed copy
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.t().as_standard_layout().into_owned(),
        }
    }

    /// Sum of every element, accumulated left to right
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, &v| acc + v)
    }

    /// Element-wise transform; `f` receives the value and its row-major index
    #[must_use]
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64, usize) -> f64,
    {
        let cols = self.shape().1;
        Self {
            data: Array2::from_shape_fn(self.shape(), |(i, j)| f(self.data[[i, j]], i * cols + j)),
        }
    }

    /// Index of the largest value. Ties resolve to the leftmost index.
    #[must_use]
    pub fn argmax(values: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in values.iter().enumerate() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Largest value of a flat sequence, `None` when empty
    #[must_use]
    pub fn max(values: &[f64]) -> Option<f64> {
        Self::argmax(values).map(|i| values[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn sample() -> Tensor {
        Tensor::new((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_length() {
        let err = Tensor::new((2, 3), vec![1.0; 5]).unwrap_err();
        assert!(matches!(err, RLError::DimensionMismatch { expected: 6, actual: 5 }));
    }

    #[test]
    fn test_elementwise_ops() {
        let a = sample();
        assert_eq!(a.add(&a).unwrap().to_vec(), vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(a.add_scalar(5.0).to_vec(), vec![6.0, 7.0, 8.0, 9.0]);
        assert_eq!(a.subtract(&a).unwrap().to_vec(), vec![0.0; 4]);
        assert_eq!(a.subtract_scalar(0.5).to_vec(), vec![0.5, 1.5, 2.5, 3.5]);
        assert_eq!(a.dot_scalar(4.0).to_vec(), vec![4.0, 8.0, 12.0, 16.0]);

        let b = Tensor::new((1, 2), vec![3.0, 16.0]).unwrap();
        assert_eq!(b.dot(&b).unwrap().to_vec(), vec![9.0, 256.0]);
        assert_relative_eq!(b.sum(), 19.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = sample();
        let b = Tensor::zeros((1, 4));
        assert!(matches!(a.add(&b), Err(RLError::ShapeMismatch { .. })));
        assert!(matches!(a.subtract(&b), Err(RLError::ShapeMismatch { .. })));
        assert!(matches!(a.dot(&b), Err(RLError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_multiply() {
        let a = sample();
        assert_eq!(a.multiply(&a).unwrap().to_vec(), vec![7.0, 10.0, 15.0, 22.0]);

        let b = Tensor::new((1, 2), vec![3.0, 16.0]).unwrap();
        let c = Tensor::new((2, 1), vec![0.3, 0.7]).unwrap();
        let product = b.multiply(&c).unwrap();
        assert_eq!(product.shape(), (1, 1));
        assert_relative_eq!(product.to_vec()[0], 12.1, epsilon = 1e-12);

        assert!(matches!(
            b.multiply(&b),
            Err(RLError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_multiply_identity() {
        let a = Tensor::new((3, 3), (1..=9).map(f64::from).collect()).unwrap();
        assert_eq!(a.multiply(&Tensor::identity(3)).unwrap(), a);
    }

    #[test]
    fn test_transpose() {
        let a = Tensor::new((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.get(2, 1), a.get(1, 2));
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_map_passes_row_major_index() {
        let a = Tensor::zeros((2, 3));
        let indexed = a.map(|v, i| v + i as f64);
        assert_eq!(indexed.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_set_in_place() {
        let mut a = sample();
        a.set(vec![9.0, 8.0, 7.0, 6.0]).unwrap();
        assert_eq!(a.get(1, 0), Some(7.0));
        assert!(a.set(vec![1.0]).is_err());
        assert_eq!(a.to_vec(), vec![9.0, 8.0, 7.0, 6.0]);
    }

    #[test]
    fn test_argmax_leftmost_tie() {
        assert_eq!(Tensor::argmax(&[3.0, 5.0, 5.0, 1.0]), Some(1));
        assert_eq!(Tensor::argmax(&[1.0, 2.0, 3.0, 4.0]), Some(3));
        assert_eq!(Tensor::argmax(&[0.0, 0.0]), Some(0));
        assert_eq!(Tensor::argmax(&[]), None);
        assert_eq!(Tensor::max(&[-2.0, -1.0, -3.0]), Some(-1.0));
    }

    proptest! {
        #[test]
        fn prop_add_then_subtract_is_identity(
            rows in 1usize..5,
            cols in 1usize..5,
            seed in proptest::collection::vec(-1e3f64..1e3, 32),
        ) {
            let a = Tensor::from_fn((rows, cols), |(i, j)| seed[i * cols + j]);
            let b = Tensor::from_fn((rows, cols), |(i, j)| seed[31 - (i * cols + j)]);
            let back = a.add(&b).unwrap().subtract(&b).unwrap();
            for (x, y) in back.to_vec().iter().zip(a.to_vec()) {
                prop_assert!((x - y).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_identity_is_neutral(
            n in 1usize..6,
            seed in proptest::collection::vec(-10f64..10.0, 36),
        ) {
            let a = Tensor::from_fn((n, n), |(i, j)| seed[i * n + j]);
            prop_assert_eq!(a.multiply(&Tensor::identity(n)).unwrap(), a);
        }
    }
}
