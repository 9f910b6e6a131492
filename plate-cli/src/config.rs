use std::error::Error;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use plate_core::{
    CornerPolicy, Grid, HeatParams, HeatState, Model, ModelKind, WaveParams, WaveState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ic::{generate_ic, zero_edges, IcType};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corners {
    #[default]
    Diagonal,
    EdgeSweep,
}

impl From<Corners> for CornerPolicy {
    fn from(c: Corners) -> Self {
        match c {
            Corners::Diagonal => CornerPolicy::Diagonal,
            Corners::EdgeSweep => CornerPolicy::EdgeSweep,
        }
    }
}

/// Physical model and its coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PhysicsConfig {
    Wave {
        speed: f64,
        dt: f64,
        dx: f64,
    },
    Heat {
        specific_heat: f64,
        density: f64,
        conductivity: f64,
        ambient: f64,
        convection: f64,
        dx: f64,
        dt: f64,
        #[serde(default)]
        corners: Corners,
    },
}

impl PhysicsConfig {
    pub fn kind(&self) -> ModelKind {
        match self {
            PhysicsConfig::Wave { .. } => ModelKind::Wave,
            PhysicsConfig::Heat { .. } => ModelKind::Heat,
        }
    }
}

/// Initial field: `base + amplitude * pattern`, pattern in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialConfig {
    pub ic: IcType,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default)]
    pub base: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    123
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,
    /// Falls back to the per-model default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    pub physics: PhysicsConfig,
    pub initial: InitialConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<RunConfig, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("reading config {}: {e}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<RunConfig, Box<dyn Error>> {
        let config: RunConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.rows < 3 || self.cols < 3 {
            return Err(format!(
                "grid must be at least 3x3 (rows={}, cols={})",
                self.rows, self.cols
            )
            .into());
        }
        if !self.initial.amplitude.is_finite() || !self.initial.base.is_finite() {
            return Err(format!(
                "initial amplitude and base must be finite (amplitude={}, base={})",
                self.initial.amplitude, self.initial.base
            )
            .into());
        }
        Ok(())
    }

    pub fn kind(&self) -> ModelKind {
        self.physics.kind()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
            .unwrap_or_else(|| self.kind().default_iterations())
    }

    /// Start field from the seeded generator.
    pub fn initial_grid(&self) -> Result<Grid, Box<dyn Error>> {
        let (rows, cols) = (self.rows, self.cols);
        let init = &self.initial;
        let mut rng = ChaCha8Rng::seed_from_u64(init.seed);

        let mut field = generate_ic(&mut rng, rows, cols, init.ic);
        if self.kind() == ModelKind::Wave {
            zero_edges(&mut field, rows, cols);
        }
        for v in field.iter_mut() {
            *v = init.base + init.amplitude * *v;
        }
        Ok(Grid::from_vec(rows, cols, field)?)
    }

    /// Validated model, starting at rest (wave) or in equilibrium (heat).
    pub fn build_model(&self) -> Result<Model, Box<dyn Error>> {
        let grid = self.initial_grid()?;
        let model = match self.physics {
            PhysicsConfig::Wave { speed, dt, dx } => {
                Model::wave(WaveState::at_rest(grid), WaveParams::new(speed, dt, dx))?
            }
            PhysicsConfig::Heat {
                specific_heat,
                density,
                conductivity,
                ambient,
                convection,
                dx,
                dt,
                corners,
            } => {
                let params = HeatParams {
                    specific_heat,
                    density,
                    conductivity,
                    ambient,
                    convection,
                    dx,
                    dt,
                };
                Model::heat(HeatState::uniform(grid), params, corners.into())?
            }
        };
        Ok(model)
    }
}
