//! Helpers shared by the integration tests.

#![allow(dead_code)]

use plate_core::{Grid, HeatParams};

/// Unit material, unit spacing; only the ambient and time step vary.
pub fn unit_heat_params(ambient: f64, dt: f64) -> HeatParams {
    HeatParams {
        specific_heat: 1.0,
        density: 1.0,
        conductivity: 1.0,
        ambient,
        convection: 1.0,
        dx: 1.0,
        dt,
    }
}

/// A smooth, non-symmetric field with non-zero edges.
pub fn bumpy_grid(rows: usize, cols: usize) -> Grid {
    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let x = i as f64 / (rows - 1) as f64;
            let y = j as f64 / (cols - 1) as f64;
            data.push((3.0 * x).sin() * (2.0 * y).cos() + 0.25 * x * y);
        }
    }
    Grid::from_vec(rows, cols, data).unwrap()
}

pub fn boundary_values(grid: &Grid) -> Vec<f64> {
    grid.boundary_cells().map(|(i, j)| grid[(i, j)]).collect()
}

/// Assert every cell of `grid` is within `tolerance` of `expected`.
pub fn assert_uniform(grid: &Grid, expected: f64, tolerance: f64, message: &str) {
    for (k, &v) in grid.as_slice().iter().enumerate() {
        let diff = (v - expected).abs();
        assert!(
            diff < tolerance,
            "{}: cell ({}, {}) = {} differs from {} by {}",
            message,
            k / grid.cols(),
            k % grid.cols(),
            v,
            expected,
            diff
        );
    }
}
