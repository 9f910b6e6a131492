mod config;
mod ic;
mod output;

use clap::{Parser, ValueEnum};
use config::{Corners, InitialConfig, PhysicsConfig, RunConfig};
use ic::IcType;
use output::DirectorySink;
use plate_core::SimulationRunner;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Wave,
    Heat,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// JSON run config; replaces every other flag except --out
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "wave")]
    mode: Mode,

    /// Grid rows
    #[arg(long, default_value_t = 40)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 40)]
    cols: usize,

    /// Number of steps (default: 50 for wave, 20 for heat)
    #[arg(long)]
    iterations: Option<usize>,

    /// Spatial step h
    #[arg(long, default_value_t = 1.0)]
    dx: f64,

    /// Time step s
    #[arg(long, default_value_t = 0.2)]
    dt: f64,

    /// Wave propagation speed a
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Specific heat c
    #[arg(long, default_value_t = 1.0)]
    specific_heat: f64,

    /// Density p
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Thermal conductivity l
    #[arg(long, default_value_t = 1.0)]
    conductivity: f64,

    /// Ambient temperature u
    #[arg(long, default_value_t = 100.0)]
    ambient: f64,

    /// Convective exchange coefficient a (heat mode)
    #[arg(long, default_value_t = 1.0)]
    convection: f64,

    /// Corner resolution for the heat boundary
    #[arg(long, value_enum, default_value = "diagonal")]
    corners: Corners,

    /// Initial condition pattern
    #[arg(long, value_enum, default_value = "pulse")]
    ic: IcType,

    /// Peak of the initial pattern above --base
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,

    /// Offset added to the initial pattern
    #[arg(long, default_value_t = 0.0)]
    base: f64,

    /// RNG seed for the initial pattern (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,
}

impl Args {
    fn to_config(&self) -> RunConfig {
        let physics = match self.mode {
            Mode::Wave => PhysicsConfig::Wave {
                speed: self.speed,
                dt: self.dt,
                dx: self.dx,
            },
            Mode::Heat => PhysicsConfig::Heat {
                specific_heat: self.specific_heat,
                density: self.density,
                conductivity: self.conductivity,
                ambient: self.ambient,
                convection: self.convection,
                dx: self.dx,
                dt: self.dt,
                corners: self.corners,
            },
        };

        RunConfig {
            rows: self.rows,
            cols: self.cols,
            iterations: self.iterations,
            physics,
            initial: InitialConfig {
                ic: self.ic,
                amplitude: self.amplitude,
                base: self.base,
                seed: self.seed,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => {
            let config = args.to_config();
            config.validate()?;
            config
        }
    };

    let iterations = config.iterations();
    let model = config.build_model()?;
    log::info!(
        "{} run on {}x{} grid, {} iterations, ic={}",
        config.kind(),
        config.rows,
        config.cols,
        iterations,
        config.initial.ic.as_str()
    );

    let mut sink = DirectorySink::new(&args.out, config);
    SimulationRunner::new(model).run_into(iterations, &mut sink)?;

    println!("Wrote frames to: {}", args.out.display());
    Ok(())
}
