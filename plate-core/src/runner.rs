use std::fmt;

use crate::error::{PlateError, Result};
use crate::grid::Grid;
use crate::heat::{CornerPolicy, HeatParams, HeatState, HeatStepper};
use crate::range::{RangeTracker, ScaleRange};
use crate::wave::{WaveParams, WaveState, WaveStepper};

/// Iteration counts used when a caller does not choose one.
pub const DEFAULT_WAVE_ITERATIONS: usize = 50;
pub const DEFAULT_HEAT_ITERATIONS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Wave,
    Heat,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Wave => "wave",
            ModelKind::Heat => "heat",
        }
    }

    pub fn default_iterations(&self) -> usize {
        match self {
            ModelKind::Wave => DEFAULT_WAVE_ITERATIONS,
            ModelKind::Heat => DEFAULT_HEAT_ITERATIONS,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that advances a field one step at a time.
pub trait Stepper {
    fn kind(&self) -> ModelKind;
    fn step(&mut self);
    fn current(&self) -> &Grid;
}

impl Stepper for WaveStepper {
    fn kind(&self) -> ModelKind {
        ModelKind::Wave
    }
    fn step(&mut self) {
        WaveStepper::step(self)
    }
    fn current(&self) -> &Grid {
        WaveStepper::current(self)
    }
}

impl Stepper for HeatStepper {
    fn kind(&self) -> ModelKind {
        ModelKind::Heat
    }
    fn step(&mut self) {
        HeatStepper::step(self)
    }
    fn current(&self) -> &Grid {
        HeatStepper::current(self)
    }
}

/// A validated model ready to run.
pub enum Model {
    Wave(WaveStepper),
    Heat(HeatStepper),
}

impl Model {
    pub fn wave(state: WaveState, params: WaveParams) -> Result<Model> {
        Ok(Model::Wave(WaveStepper::new(state, params)?))
    }

    pub fn heat(state: HeatState, params: HeatParams, corners: CornerPolicy) -> Result<Model> {
        Ok(Model::Heat(HeatStepper::new(state, params, corners)?))
    }
}

impl Stepper for Model {
    fn kind(&self) -> ModelKind {
        match self {
            Model::Wave(_) => ModelKind::Wave,
            Model::Heat(_) => ModelKind::Heat,
        }
    }

    fn step(&mut self) {
        match self {
            Model::Wave(w) => w.step(),
            Model::Heat(h) => h.step(),
        }
    }

    fn current(&self) -> &Grid {
        match self {
            Model::Wave(w) => w.current(),
            Model::Heat(h) => h.current(),
        }
    }
}

/// Immutable snapshot of the field after `step` completed steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    step: usize,
    grid: Grid,
}

impl Frame {
    fn capture(step: usize, grid: &Grid) -> Frame {
        Frame {
            step,
            grid: grid.clone(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Everything a renderer needs from one run.
#[derive(Clone, Debug)]
pub struct SimulationOutput {
    pub kind: ModelKind,
    pub frames: Vec<Frame>,
    pub range: ScaleRange,
}

impl SimulationOutput {
    pub fn start_frame(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn final_frame(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }
}

/// Receiver of a finished run, owned by the rendering side.
pub trait FrameSink {
    type Error;

    fn accept(&mut self, output: SimulationOutput) -> std::result::Result<(), Self::Error>;
}

impl FrameSink for Vec<SimulationOutput> {
    type Error = PlateError;

    fn accept(&mut self, output: SimulationOutput) -> Result<()> {
        self.push(output);
        Ok(())
    }
}

/// Drives a stepper for a fixed number of iterations.
///
/// Frame 0 is the start state. Each completed step appends one frame and
/// widens the range tracker. A step that produces NaN or an infinity aborts
/// the run; no partial frame sequence is returned.
pub struct SimulationRunner<S: Stepper> {
    stepper: S,
    tracker: RangeTracker,
}

impl<S: Stepper> SimulationRunner<S> {
    pub fn new(stepper: S) -> Self {
        SimulationRunner {
            stepper,
            tracker: RangeTracker::new(),
        }
    }

    pub fn run(mut self, iterations: usize) -> Result<SimulationOutput> {
        let kind = self.stepper.kind();
        let (rows, cols) = self.stepper.current().shape();
        log::debug!("{kind} run: {rows}x{cols}, {iterations} iterations");

        let mut frames = Vec::with_capacity(iterations + 1);
        frames.push(Frame::capture(0, self.stepper.current()));

        for step in 1..=iterations {
            self.stepper.step();
            let grid = self.stepper.current();
            if let Some((row, col)) = grid.first_non_finite() {
                log::error!("{kind} run diverged at step {step}, cell ({row}, {col})");
                return Err(PlateError::NonFiniteResult { step, row, col });
            }
            frames.push(Frame::capture(step, grid));
            self.tracker.observe(grid);
        }

        let range = self.tracker.range();
        log::debug!(
            "{kind} run complete: {} frames, range [{}, {}]",
            frames.len(),
            range.min,
            range.max
        );

        Ok(SimulationOutput {
            kind,
            frames,
            range,
        })
    }

    /// Runs to completion and hands the result to `sink`.
    pub fn run_into<K>(self, iterations: usize, sink: &mut K) -> std::result::Result<(), K::Error>
    where
        K: FrameSink,
        K::Error: From<PlateError>,
    {
        let output = self.run(iterations)?;
        sink.accept(output)
    }
}

/// Validated one-shot run of `model`.
pub fn run(model: Model, iterations: usize) -> Result<SimulationOutput> {
    SimulationRunner::new(model).run(iterations)
}
