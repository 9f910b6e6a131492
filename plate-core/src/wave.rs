//! Leapfrog scheme for the transverse wave equation `u_tt = a^2 (u_xx + u_yy)`.

use crate::error::{PlateError, Result};
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Propagation speed `a`.
    pub speed: f64,
    /// Time step `s`.
    pub dt: f64,
    /// Grid spacing `h`.
    pub dx: f64,
}

impl WaveParams {
    pub fn new(speed: f64, dt: f64, dx: f64) -> Self {
        WaveParams { speed, dt, dx }
    }

    /// `a*s/h`; the scheme is stable for values up to 1.
    pub fn courant(&self) -> f64 {
        self.speed * self.dt / self.dx
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("speed", self.speed), ("dt", self.dt), ("dx", self.dx)] {
            if !value.is_finite() {
                return Err(PlateError::invalid_parameter(name, value, "must be finite"));
            }
        }
        if self.dx <= 0.0 {
            return Err(PlateError::invalid_parameter("dx", self.dx, "must be positive"));
        }
        Ok(())
    }

    fn coefficient(&self) -> f64 {
        let c = self.courant();
        c * c
    }
}

/// Field at `t-2`, `t-1` and `t`.
#[derive(Clone, Debug)]
pub struct WaveState {
    pub prev2: Grid,
    pub prev1: Grid,
    pub current: Grid,
}

impl WaveState {
    pub fn new(prev2: Grid, prev1: Grid, current: Grid) -> Result<WaveState> {
        current.ensure_same_shape(&prev1)?;
        current.ensure_same_shape(&prev2)?;
        Ok(WaveState {
            prev2,
            prev1,
            current,
        })
    }

    /// A membrane held in `shape` with zero initial velocity.
    pub fn at_rest(shape: Grid) -> WaveState {
        WaveState {
            prev2: shape.clone(),
            prev1: shape.clone(),
            current: shape,
        }
    }
}

pub struct WaveStepper {
    params: WaveParams,
    coef: f64,
    prev2: Grid,
    prev1: Grid,
    current: Grid,
}

impl WaveStepper {
    /// Each buffer keeps its own boundary ring for the whole run. The ring
    /// of `state.current` is the clamp seen in every frame; the ring of
    /// `state.prev1` is what the stencil reads next to the edges.
    pub fn new(state: WaveState, params: WaveParams) -> Result<WaveStepper> {
        params.validate()?;
        let WaveState {
            prev2,
            prev1,
            current,
        } = WaveState::new(state.prev2, state.prev1, state.current)?;
        for g in [&prev2, &prev1, &current] {
            if let Some((row, col)) = g.first_non_finite() {
                return Err(PlateError::NonFiniteInput { row, col });
            }
        }

        let courant = params.courant();
        if courant > 1.0 {
            log::warn!("wave courant number {courant:.3} exceeds 1, expect divergence");
        }

        log::debug!(
            "wave stepper {}x{}: a={} s={} h={}",
            current.rows(),
            current.cols(),
            params.speed,
            params.dt,
            params.dx
        );

        Ok(WaveStepper {
            params,
            coef: params.coefficient(),
            prev2,
            prev1,
            current,
        })
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn prev1(&self) -> &Grid {
        &self.prev1
    }

    pub fn prev2(&self) -> &Grid {
        &self.prev2
    }

    /// Advances one step. The new field is written over the oldest buffer,
    /// which then rotates to the front of the history. Rings are exchanged
    /// before the rotation so they stay with their time level.
    pub fn step(&mut self) {
        let (n, m) = self.current.shape();
        let c = self.coef;
        let old = self.prev1.as_slice();
        let next = self.prev2.as_mut_slice();

        for y in 1..(n - 1) {
            let row = y * m;
            for x in 1..(m - 1) {
                let i = row + x;

                let u = old[i];
                let up = old[i - m];
                let down = old[i + m];
                let left = old[i - 1];
                let right = old[i + 1];

                let lap = (up + down + left + right) - 4.0 * u;
                next[i] = c * lap + 2.0 * u - next[i];
            }
        }

        self.prev2.swap_boundary_with(&mut self.prev1);
        std::mem::swap(&mut self.prev2, &mut self.prev1);
        self.current.copy_interior_from(&self.prev1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse(n: usize, value: f64) -> Grid {
        let mut g = Grid::new(n, n).unwrap();
        g[(n / 2, n / 2)] = value;
        g
    }

    #[test]
    fn validate_rejects_zero_spacing() {
        let err = WaveParams::new(1.0, 0.1, 0.0).validate().unwrap_err();
        assert!(matches!(err, PlateError::InvalidParameter { name: "dx", .. }));
    }

    #[test]
    fn validate_rejects_nan() {
        let err = WaveParams::new(f64::NAN, 0.1, 1.0).validate().unwrap_err();
        assert!(matches!(err, PlateError::InvalidParameter { name: "speed", .. }));
    }

    #[test]
    fn mismatched_history_is_rejected() {
        let state = WaveState {
            prev2: Grid::new(5, 5).unwrap(),
            prev1: Grid::new(5, 4).unwrap(),
            current: Grid::new(5, 5).unwrap(),
        };
        let err = WaveStepper::new(state, WaveParams::new(1.0, 0.1, 1.0))
            .err()
            .unwrap();
        assert_eq!(
            err,
            PlateError::DimensionMismatch {
                expected: (5, 5),
                actual: (5, 4)
            }
        );
    }

    #[test]
    fn single_step_matches_stencil() {
        // a*s/h = 0.1, so the coefficient is 0.01.
        let mut w = WaveStepper::new(
            WaveState::at_rest(pulse(5, 1.0)),
            WaveParams::new(1.0, 0.1, 1.0),
        )
        .unwrap();
        w.step();

        let g = w.current();
        assert!((g[(2, 2)] - (0.01 * -4.0 + 2.0 - 1.0)).abs() < 1e-12);
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert!((g[(i, j)] - 0.01).abs() < 1e-12, "cell ({i}, {j})");
        }
        for (i, j) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            assert_eq!(g[(i, j)], 0.0, "cell ({i}, {j})");
        }
        assert_eq!(w.prev2()[(2, 2)], 1.0);
        assert_eq!(w.prev1(), w.current());
    }

    #[test]
    fn history_rings_are_kept_and_read() {
        let mut prev2 = Grid::new(5, 5).unwrap();
        prev2[(0, 2)] = 5.0;
        let mut prev1 = Grid::new(5, 5).unwrap();
        prev1[(0, 2)] = 1.0;
        let mut w = WaveStepper::new(
            WaveState::new(prev2, prev1, Grid::new(5, 5).unwrap()).unwrap(),
            WaveParams::new(1.0, 0.1, 1.0),
        )
        .unwrap();

        w.step();
        // The stencil at (1, 2) sees prev1's edge value above it.
        assert!((w.current()[(1, 2)] - 0.01).abs() < 1e-12);
        assert_eq!(w.current()[(0, 2)], 0.0);
        assert_eq!(w.prev1()[(0, 2)], 1.0);
        assert_eq!(w.prev2()[(0, 2)], 5.0);

        w.step();
        // lap = 1 + 0 + 0 + 0 - 4*0.01, plus 2*0.01 - 0.
        assert!((w.current()[(1, 2)] - (0.01 * 0.96 + 0.02)).abs() < 1e-12);
        assert_eq!(w.current()[(0, 2)], 0.0);
        assert_eq!(w.prev1()[(0, 2)], 1.0);
        assert_eq!(w.prev2()[(0, 2)], 5.0);
    }
}
