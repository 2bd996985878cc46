use std::fmt::Debug;
use std::ops::{Add, Mul};

use halfhop_core::errors::{ErrorInfo, HalfHopError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Floating point element type of a [`FeatureMatrix`].
///
/// Implemented for `f32` and `f64`; arithmetic on features always stays in the
/// precision of the matrix.
pub trait Scalar:
    Copy
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Mul<Output = Self>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Name recorded in serialized envelopes.
    const DTYPE: &'static str;

    /// Converts an `f64` parameter into this precision.
    fn from_f64(value: f64) -> Self;

    /// Raw bit pattern, widened to 64 bits, used for canonical hashing.
    fn bits(self) -> u64;

    /// Returns `false` for NaN and the infinities.
    fn is_finite(self) -> bool;
}

impl Scalar for f32 {
    const DTYPE: &'static str = "f32";

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Scalar for f64 {
    const DTYPE: &'static str = "f64";

    fn from_f64(value: f64) -> Self {
        value
    }

    fn bits(self) -> u64 {
        self.to_bits()
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Dense row-major node-feature matrix of shape `[rows, cols]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> FeatureMatrix<T> {
    /// Wraps a row-major buffer, checking that it holds exactly `rows * cols` values.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, HalfHopError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            HalfHopError::Validation(
                ErrorInfo::new("feature-shape", "feature matrix shape overflows")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string()),
            )
        })?;
        if data.len() != expected {
            return Err(HalfHopError::Validation(
                ErrorInfo::new("feature-shape", "feature buffer does not match its shape")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string())
                    .with_context("len", data.len().to_string()),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows. All rows must share one width.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, HalfHopError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(HalfHopError::Validation(
                    ErrorInfo::new("feature-shape", "feature rows have differing widths")
                        .with_context("row", idx.to_string())
                        .with_context("expected", cols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows (nodes).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (feature width).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of the values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of the values.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns row `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[T] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    /// Appends `count` rows given as a row-major buffer.
    pub fn append_rows(&mut self, count: usize, data: Vec<T>) -> Result<(), HalfHopError> {
        if data.len() != count * self.cols {
            return Err(HalfHopError::Validation(
                ErrorInfo::new("feature-shape", "appended rows do not match the feature width")
                    .with_context("cols", self.cols.to_string())
                    .with_context("count", count.to_string())
                    .with_context("len", data.len().to_string()),
            ));
        }
        self.data.extend(data);
        self.rows += count;
        Ok(())
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|idx| self.row(idx).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sliced_row_major() {
        let matrix = FeatureMatrix::new(2, 3, vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(matrix.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(matrix.to_rows().len(), 2);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = FeatureMatrix::from_rows(&[vec![1.0f64, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.info().code, "feature-shape");
        assert_eq!(err.info().context.get("row").map(String::as_str), Some("1"));
    }

    #[test]
    fn zero_width_rows_can_be_appended() {
        let mut matrix = FeatureMatrix::<f32>::new(3, 0, Vec::new()).unwrap();
        matrix.append_rows(2, Vec::new()).unwrap();
        assert_eq!(matrix.rows(), 5);
        assert!(matrix.row(4).is_empty());
    }

    #[test]
    fn append_checks_width() {
        let mut matrix = FeatureMatrix::<f32>::new(0, 2, Vec::new()).unwrap();
        assert!(matrix.append_rows(1, vec![1.0]).is_err());
        matrix.append_rows(1, vec![1.0, 2.0]).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![1.0, 2.0]]);
    }
}
