use std::ops::{Index, IndexMut};

use crate::error::{PlateError, Result};

/// Row-major `rows x cols` field of real values.
///
/// Row 0 and row `rows - 1`, column 0 and column `cols - 1` form the
/// boundary ring; everything else is interior. A grid always has at least
/// one interior cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Grid> {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Grid> {
        check_extent(rows, cols)?;
        Ok(Grid {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Grid> {
        check_extent(rows, cols)?;
        if data.len() != rows * cols {
            return Err(PlateError::LengthMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Grid { rows, cols, data })
    }

    /// Builds a grid from nested rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Grid> {
        let n = rows.len();
        let m = rows.first().map_or(0, |r| r.as_ref().len());
        check_extent(n, m)?;

        let mut data = Vec::with_capacity(n * m);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != m {
                return Err(PlateError::RaggedGrid {
                    row,
                    len: values.len(),
                    expected: m,
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Grid {
            rows: n,
            cols: m,
            data,
        })
    }

    // ---- Accessors ----

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        Some(self.data[i * self.cols + j])
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if i >= self.rows || j >= self.cols {
            return;
        }
        self.data[i * self.cols + j] = value;
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.rows - 1 || j == self.cols - 1
    }

    /// Visits every boundary cell exactly once, row-major.
    pub fn boundary_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |i| (0..self.cols).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.is_boundary(i, j))
    }

    // ---- Reductions ----

    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// First cell holding NaN or an infinity, row-major.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|k| (k / self.cols, k % self.cols))
    }

    // ---- Buffer plumbing ----

    pub(crate) fn ensure_same_shape(&self, other: &Grid) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(PlateError::DimensionMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }

    /// Copies all values from a grid of the same shape.
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        self.data.copy_from_slice(&other.data);
    }

    /// Exchanges boundary rings with a grid of the same shape.
    pub(crate) fn swap_boundary_with(&mut self, other: &mut Grid) {
        let (n, m) = (self.rows, self.cols);
        let last = (n - 1) * m;
        self.data[..m].swap_with_slice(&mut other.data[..m]);
        self.data[last..].swap_with_slice(&mut other.data[last..]);
        for i in 1..(n - 1) {
            let row = i * m;
            std::mem::swap(&mut self.data[row], &mut other.data[row]);
            std::mem::swap(&mut self.data[row + m - 1], &mut other.data[row + m - 1]);
        }
    }

    /// Copies only the interior from a grid of the same shape.
    pub(crate) fn copy_interior_from(&mut self, other: &Grid) {
        let m = self.cols;
        for i in 1..(self.rows - 1) {
            let start = i * m + 1;
            let end = i * m + m - 1;
            self.data[start..end].copy_from_slice(&other.data[start..end]);
        }
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

fn check_extent(rows: usize, cols: usize) -> Result<()> {
    if rows < 3 || cols < 3 {
        return Err(PlateError::GridTooSmall { rows, cols });
    }
    Ok(())
}
