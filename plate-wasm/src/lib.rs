use plate_core::{
    CornerPolicy, Grid, HeatParams, HeatState, Model, PlateError, SimulationOutput,
    SimulationRunner, WaveParams, WaveState,
};
use wasm_bindgen::prelude::*;

/// Plate exposed to a JS renderer: edit the start field, run a model, then
/// read frames back one at a time.
#[wasm_bindgen]
pub struct Plate {
    start: Grid,
    output: Option<SimulationOutput>,
}

#[wasm_bindgen]
impl Plate {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize) -> Result<Plate, JsValue> {
        let start = Grid::new(rows, cols).map_err(to_js)?;
        Ok(Plate {
            start,
            output: None,
        })
    }

    pub fn rows(&self) -> usize { self.start.rows() }
    pub fn cols(&self) -> usize { self.start.cols() }

    // Start field
    pub fn clear(&mut self) { self.start.fill(0.0); }
    pub fn set_cell(&mut self, row: usize, col: usize, value: f64) {
        self.start.set(row, col, value);
    }

    /// Press the membrane at one interior point.
    pub fn add_pulse(&mut self, row: usize, col: usize, value: f64) {
        if let Some(v) = self.start.get(row, col) {
            if !self.start.is_boundary(row, col) {
                self.start.set(row, col, v + value);
            }
        }
    }

    pub fn get_start(&self) -> Vec<f64> {
        self.start.as_slice().to_vec()
    }

    // Runs (timing is WASM-only)
    pub fn run_wave(&mut self, a: f64, s: f64, h: f64, times: usize) -> Result<RunInfo, JsValue> {
        let model = Model::wave(WaveState::at_rest(self.start.clone()), WaveParams::new(a, s, h))
            .map_err(to_js)?;
        self.run_model(model, times)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run_heat(
        &mut self,
        c: f64,
        p: f64,
        l: f64,
        u: f64,
        a: f64,
        h: f64,
        s: f64,
        times: usize,
    ) -> Result<RunInfo, JsValue> {
        let params = HeatParams {
            specific_heat: c,
            density: p,
            conductivity: l,
            ambient: u,
            convection: a,
            dx: h,
            dt: s,
        };
        let model = Model::heat(
            HeatState::uniform(self.start.clone()),
            params,
            CornerPolicy::Diagonal,
        )
        .map_err(to_js)?;
        self.run_model(model, times)
    }

    // Frames of the last run
    pub fn frame_count(&self) -> usize {
        self.output.as_ref().map_or(0, |o| o.frames.len())
    }

    /// Copy-based JS access (reliable)
    pub fn get_frame(&self, index: usize) -> Option<Vec<f64>> {
        let out = self.output.as_ref()?;
        out.frames.get(index).map(|f| f.grid().as_slice().to_vec())
    }

    pub fn scale_min(&self) -> f64 {
        self.output.as_ref().map_or(0.0, |o| o.range.min)
    }

    pub fn scale_max(&self) -> f64 {
        self.output.as_ref().map_or(0.0, |o| o.range.max)
    }
}

impl Plate {
    fn run_model(&mut self, model: Model, times: usize) -> Result<RunInfo, JsValue> {
        self.output = None;
        let t0 = now_ms();
        let output = SimulationRunner::new(model).run(times).map_err(to_js)?;
        let t1 = now_ms();
        let info = RunInfo { frames: output.frames.len(), compute_ms: t1 - t0 };
        self.output = Some(output);
        Ok(info)
    }
}

#[wasm_bindgen]
pub struct RunInfo {
    frames: usize,
    compute_ms: f64,
}

#[wasm_bindgen]
impl RunInfo {
    pub fn frames(&self) -> usize { self.frames }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}

fn to_js(e: PlateError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// Native builds (tests) have no JS clock.
#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_run_keeps_frames() {
        let mut plate = Plate::new(5, 5).ok().unwrap();
        plate.add_pulse(2, 2, 1.0);
        plate.add_pulse(0, 2, 1.0);
        assert_eq!(plate.get_start().iter().sum::<f64>(), 1.0);

        let info = plate.run_wave(1.0, 0.1, 1.0, 3).ok().unwrap();
        assert_eq!(info.frames(), 4);
        assert_eq!(plate.frame_count(), 4);
        assert_eq!(plate.get_frame(0), Some(plate.get_start()));
        assert!(plate.get_frame(4).is_none());
        assert!(plate.scale_max() > 1.0);
    }

    #[test]
    fn heat_run_blends_edges() {
        let mut plate = Plate::new(4, 4).ok().unwrap();
        plate.run_heat(1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 0.1, 1).ok().unwrap();
        let last = plate.get_frame(1).unwrap();
        assert_eq!(last[1], 5.0);
        assert_eq!(plate.scale_max(), 6.0);
    }
}
