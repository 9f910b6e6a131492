//! Explicit heat diffusion with convective exchange at the plate edges.
//!
//! The interior follows `u_t = l/(c*p) * (u_xx + u_yy)`. Each edge cell is a
//! Robin blend of the ambient temperature `u` and its nearest interior cell:
//!
//! ```text
//! edge = (k*u + inner) / (1 + k),    k = a*h/l
//! ```
//!
//! Edges are always computed after the interior and read the freshly
//! written interior values.

use crate::error::{PlateError, Result};
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatParams {
    /// Specific heat `c`.
    pub specific_heat: f64,
    /// Density `p`.
    pub density: f64,
    /// Thermal conductivity `l`.
    pub conductivity: f64,
    /// Ambient temperature `u`.
    pub ambient: f64,
    /// Convective exchange coefficient `a`.
    pub convection: f64,
    /// Grid spacing `h`.
    pub dx: f64,
    /// Time step `s`.
    pub dt: f64,
}

impl HeatParams {
    /// `l*s / (c*p*h^2)`; the explicit 2D scheme is stable up to 1/4.
    pub fn diffusion_number(&self) -> f64 {
        (self.conductivity * self.dt)
            / (self.specific_heat * self.density * self.dx * self.dx)
    }

    /// `a*h/l`, weight of the ambient temperature at the edges.
    pub fn biot_number(&self) -> f64 {
        self.convection * self.dx / self.conductivity
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("specific_heat", self.specific_heat),
            ("density", self.density),
            ("conductivity", self.conductivity),
            ("ambient", self.ambient),
            ("convection", self.convection),
            ("dx", self.dx),
            ("dt", self.dt),
        ] {
            if !value.is_finite() {
                return Err(PlateError::invalid_parameter(name, value, "must be finite"));
            }
        }
        if self.dx <= 0.0 {
            return Err(PlateError::invalid_parameter("dx", self.dx, "must be positive"));
        }
        if self.specific_heat * self.density == 0.0 {
            return Err(PlateError::invalid_parameter(
                "specific_heat",
                self.specific_heat * self.density,
                "specific_heat * density must be non-zero",
            ));
        }
        if self.conductivity == 0.0 {
            return Err(PlateError::invalid_parameter(
                "conductivity",
                self.conductivity,
                "must be non-zero",
            ));
        }
        let k = self.biot_number();
        if !k.is_finite() || 1.0 + k == 0.0 {
            return Err(PlateError::invalid_parameter(
                "convection",
                self.convection,
                "1 + convection*dx/conductivity must be non-zero",
            ));
        }
        Ok(())
    }
}

/// How the four corner cells are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CornerPolicy {
    /// Edges skip the corners; each corner blends with its diagonal interior
    /// neighbour.
    #[default]
    Diagonal,
    /// Full-length passes top, bottom, left, right. Corners are written
    /// twice; the column passes win and read the just-written row edges.
    EdgeSweep,
}

/// Temperature at `t-1` and `t`.
#[derive(Clone, Debug)]
pub struct HeatState {
    pub prev: Grid,
    pub current: Grid,
}

impl HeatState {
    pub fn new(prev: Grid, current: Grid) -> Result<HeatState> {
        current.ensure_same_shape(&prev)?;
        Ok(HeatState { prev, current })
    }

    pub fn uniform(grid: Grid) -> HeatState {
        HeatState {
            prev: grid.clone(),
            current: grid,
        }
    }
}

pub struct HeatStepper {
    params: HeatParams,
    corners: CornerPolicy,
    r: f64,
    ku: f64,
    denom: f64,
    prev: Grid,
    current: Grid,
}

impl HeatStepper {
    pub fn new(state: HeatState, params: HeatParams, corners: CornerPolicy) -> Result<HeatStepper> {
        params.validate()?;
        let HeatState { prev, current } = HeatState::new(state.prev, state.current)?;
        for g in [&prev, &current] {
            if let Some((row, col)) = g.first_non_finite() {
                return Err(PlateError::NonFiniteInput { row, col });
            }
        }

        let r = params.diffusion_number();
        if r > 0.25 {
            log::warn!("heat diffusion number {r:.3} exceeds 0.25, expect divergence");
        }
        let k = params.biot_number();

        log::debug!(
            "heat stepper {}x{}: r={r} k={k} ambient={} corners={corners:?}",
            current.rows(),
            current.cols(),
            params.ambient
        );

        Ok(HeatStepper {
            params,
            corners,
            r,
            ku: k * params.ambient,
            denom: 1.0 + k,
            prev,
            current,
        })
    }

    pub fn params(&self) -> &HeatParams {
        &self.params
    }

    pub fn corner_policy(&self) -> CornerPolicy {
        self.corners
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn prev(&self) -> &Grid {
        &self.prev
    }

    pub fn step(&mut self) {
        self.interior_step();
        match self.corners {
            CornerPolicy::Diagonal => self.apply_robin_diagonal(),
            CornerPolicy::EdgeSweep => self.apply_robin_sweep(),
        }
        self.prev.copy_from(&self.current);
    }

    // ---- Internal numeric routines ----

    fn interior_step(&mut self) {
        let (n, m) = self.current.shape();
        let c = self.r;
        let old = self.prev.as_slice();
        let next = self.current.as_mut_slice();

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
                next[i] = c * lap + u;
            }
        }
    }

    fn robin(&self, inner: f64) -> f64 {
        (self.ku + inner) / self.denom
    }

    fn apply_robin_diagonal(&mut self) {
        let (n, m) = self.current.shape();

        for x in 1..(m - 1) {
            self.current[(0, x)] = self.robin(self.current[(1, x)]);
            self.current[(n - 1, x)] = self.robin(self.current[(n - 2, x)]);
        }
        for y in 1..(n - 1) {
            self.current[(y, 0)] = self.robin(self.current[(y, 1)]);
            self.current[(y, m - 1)] = self.robin(self.current[(y, m - 2)]);
        }

        self.current[(0, 0)] = self.robin(self.current[(1, 1)]);
        self.current[(0, m - 1)] = self.robin(self.current[(1, m - 2)]);
        self.current[(n - 1, 0)] = self.robin(self.current[(n - 2, 1)]);
        self.current[(n - 1, m - 1)] = self.robin(self.current[(n - 2, m - 2)]);
    }

    fn apply_robin_sweep(&mut self) {
        let (n, m) = self.current.shape();

        for x in 0..m {
            self.current[(0, x)] = self.robin(self.current[(1, x)]);
        }
        for x in 0..m {
            self.current[(n - 1, x)] = self.robin(self.current[(n - 2, x)]);
        }
        for y in 0..n {
            self.current[(y, 0)] = self.robin(self.current[(y, 1)]);
        }
        for y in 0..n {
            self.current[(y, m - 1)] = self.robin(self.current[(y, m - 2)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ambient: f64) -> HeatParams {
        HeatParams {
            specific_heat: 1.0,
            density: 1.0,
            conductivity: 1.0,
            ambient,
            convection: 1.0,
            dx: 1.0,
            dt: 0.1,
        }
    }

    #[test]
    fn numbers() {
        let p = HeatParams {
            specific_heat: 2.0,
            density: 4.0,
            conductivity: 0.5,
            dx: 0.5,
            dt: 0.2,
            convection: 3.0,
            ambient: 0.0,
        };
        assert!((p.diffusion_number() - 0.05).abs() < 1e-12);
        assert!((p.biot_number() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_degenerate_material() {
        let mut p = params(0.0);
        p.density = 0.0;
        assert!(matches!(
            p.validate(),
            Err(PlateError::InvalidParameter { name: "specific_heat", .. })
        ));

        let mut p = params(0.0);
        p.conductivity = 0.0;
        assert!(matches!(
            p.validate(),
            Err(PlateError::InvalidParameter { name: "conductivity", .. })
        ));

        // k = -1 makes the Robin denominator vanish.
        let mut p = params(0.0);
        p.convection = -1.0;
        assert!(matches!(
            p.validate(),
            Err(PlateError::InvalidParameter { name: "convection", .. })
        ));
    }

    #[test]
    fn interior_matches_stencil() {
        let mut g = Grid::new(5, 5).unwrap();
        g[(2, 2)] = 1.0;
        let mut h =
            HeatStepper::new(HeatState::uniform(g), params(0.0), CornerPolicy::Diagonal).unwrap();
        h.step();

        let c = h.current();
        assert!((c[(2, 2)] - (1.0 - 0.4)).abs() < 1e-12);
        assert!((c[(1, 2)] - 0.1).abs() < 1e-12);
        // Top edge above (1, 2) blends ambient 0 with 0.1.
        assert!((c[(0, 2)] - 0.05).abs() < 1e-12);
        assert_eq!(h.prev(), h.current());
    }

    #[test]
    fn first_step_reads_prev_not_current() {
        let prev = Grid::filled(4, 4, 2.0).unwrap();
        let current = Grid::filled(4, 4, 9.0).unwrap();
        let mut h = HeatStepper::new(
            HeatState::new(prev, current).unwrap(),
            params(2.0),
            CornerPolicy::Diagonal,
        )
        .unwrap();
        h.step();
        assert!(h.current().as_slice().iter().all(|&v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn diagonal_corners_read_interior() {
        let mut g = Grid::new(4, 5).unwrap();
        g[(1, 1)] = 4.0;
        g[(2, 3)] = 8.0;
        // r = 0 leaves the interior untouched.
        let mut p = params(0.0);
        p.dt = 0.0;
        let mut h = HeatStepper::new(HeatState::uniform(g), p, CornerPolicy::Diagonal).unwrap();
        h.step();

        let c = h.current();
        assert_eq!(c[(0, 0)], 2.0);
        assert_eq!(c[(3, 4)], 4.0);
        assert_eq!(c[(0, 4)], 0.0);
        assert_eq!(c[(3, 0)], 0.0);
    }

    #[test]
    fn sweep_corners_take_column_pass() {
        let mut p = params(10.0);
        p.dt = 0.0;
        let start = HeatState::uniform(Grid::new(4, 4).unwrap());
        let mut h = HeatStepper::new(start, p, CornerPolicy::EdgeSweep).unwrap();
        h.step();

        let c = h.current();
        for (i, j) in [(0, 0), (0, 3), (3, 0), (3, 3)] {
            assert_eq!(c[(i, j)], 7.5, "corner ({i}, {j})");
        }
        assert_eq!(c[(0, 1)], 5.0);
        assert_eq!(c[(2, 3)], 5.0);
    }
}
