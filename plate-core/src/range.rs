use crate::grid::Grid;

/// Display range handed to the renderer along with the frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

/// Running min/max of every grid observed during one run.
///
/// Starts at `(0, 0)` and only ever widens. Whenever a grid pushes past the
/// current floor or ceiling, the new bound is placed one unit beyond the
/// grid's extreme.
#[derive(Clone, Debug, Default)]
pub struct RangeTracker {
    range: ScaleRange,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, grid: &Grid) {
        let (lo, hi) = grid.min_max();
        if lo < self.range.min {
            self.range.min = lo - 1.0;
        }
        if hi > self.range.max {
            self.range.max = hi + 1.0;
        }
    }

    pub fn range(&self) -> ScaleRange {
        self.range
    }

    pub fn reset(&mut self) {
        self.range = ScaleRange::default();
    }
}
