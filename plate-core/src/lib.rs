//! Time stepping for a scalar field on a rectangular plate.
//!
//! Two models share one runner:
//!
//! - [`WaveStepper`]: membrane deflection, leapfrog scheme with clamped edges.
//! - [`HeatStepper`]: explicit heat diffusion with convective (Robin) edges.
//!
//! A run records the start frame plus one [`Frame`] per step and a padded
//! [`ScaleRange`] for the renderer.
//!
//! ```rust
//! use plate_core::{run, Grid, HeatParams, HeatState, CornerPolicy, Model};
//!
//! # fn main() -> Result<(), plate_core::PlateError> {
//! let params = HeatParams {
//!     specific_heat: 1.0,
//!     density: 1.0,
//!     conductivity: 1.0,
//!     ambient: 10.0,
//!     convection: 1.0,
//!     dx: 1.0,
//!     dt: 0.1,
//! };
//! let model = Model::heat(HeatState::uniform(Grid::new(4, 4)?), params, CornerPolicy::Diagonal)?;
//! let out = run(model, 1)?;
//! assert_eq!(out.frames.len(), 2);
//! assert_eq!(out.final_frame().grid()[(0, 1)], 5.0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod grid;
pub mod heat;
pub mod range;
pub mod runner;
pub mod wave;

pub use error::{PlateError, Result};
pub use grid::Grid;
pub use heat::{CornerPolicy, HeatParams, HeatState, HeatStepper};
pub use range::{RangeTracker, ScaleRange};
pub use runner::{
    run, Frame, FrameSink, Model, ModelKind, SimulationOutput, SimulationRunner, Stepper,
    DEFAULT_HEAT_ITERATIONS, DEFAULT_WAVE_ITERATIONS,
};
pub use wave::{WaveParams, WaveState, WaveStepper};
