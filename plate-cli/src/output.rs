use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use plate_core::{FrameSink, SimulationOutput};
use serde::Serialize;

use crate::config::RunConfig;

#[derive(Serialize)]
struct FrameRow {
    step: usize,
    min: f64,
    max: f64,
    mean: f64,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    mode: &'static str,
    rows: usize,
    cols: usize,
    frames: usize,
    scale_min: f64,
    scale_max: f64,
    config: &'a RunConfig,
}

/// Writes a finished run to a directory:
///
/// - `frames.bin`: every frame as `rows * cols` little-endian f64, in order
/// - `frames.jsonl`: one row of per-frame statistics
/// - `run.json`: dimensions, display range and the config that produced them
pub struct DirectorySink {
    out: PathBuf,
    config: RunConfig,
}

impl DirectorySink {
    pub fn new(out: &Path, config: RunConfig) -> DirectorySink {
        DirectorySink {
            out: out.to_path_buf(),
            config,
        }
    }
}

impl FrameSink for DirectorySink {
    type Error = Box<dyn Error>;

    fn accept(&mut self, output: SimulationOutput) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.out)?;

        let mut frame_writer = BufWriter::new(File::create(self.out.join("frames.bin"))?);
        let mut meta_file = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(self.out.join("frames.jsonl"))?,
        );

        for frame in &output.frames {
            let grid = frame.grid();
            write_f64_vec(&mut frame_writer, grid.as_slice())?;

            let (min, max) = grid.min_max();
            let row = FrameRow {
                step: frame.step(),
                min,
                max,
                mean: grid.mean(),
            };
            serde_json::to_writer(&mut meta_file, &row)?;
            meta_file.write_all(b"\n")?;
        }

        frame_writer.flush()?;
        meta_file.flush()?;

        let (rows, cols) = output.start_frame().grid().shape();
        let summary = RunSummary {
            mode: output.kind.as_str(),
            rows,
            cols,
            frames: output.frames.len(),
            scale_min: output.range.min,
            scale_max: output.range.max,
            config: &self.config,
        };
        let mut summary_file = BufWriter::new(File::create(self.out.join("run.json"))?);
        serde_json::to_writer_pretty(&mut summary_file, &summary)?;
        summary_file.flush()?;

        log::info!(
            "wrote {} frames of {}x{} to {}",
            output.frames.len(),
            rows,
            cols,
            self.out.display()
        );
        Ok(())
    }
}

fn write_f64_vec<W: Write>(w: &mut W, v: &[f64]) -> std::io::Result<()> {
    for &x in v {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_core::SimulationRunner;

    #[test]
    fn writes_frames_and_summary() {
        let cfg = RunConfig::from_json(
            r#"{
                "rows": 5, "cols": 6, "iterations": 4,
                "physics": { "mode": "wave", "speed": 1.0, "dt": 0.5, "dx": 1.0 },
                "initial": { "ic": "pulse" }
            }"#,
        )
        .unwrap();
        let out = std::env::temp_dir().join(format!("plate-cli-sink-{}", std::process::id()));
        let mut sink = DirectorySink::new(&out, cfg.clone());
        SimulationRunner::new(cfg.build_model().unwrap())
            .run_into(cfg.iterations(), &mut sink)
            .unwrap();

        let bin = fs::read(out.join("frames.bin")).unwrap();
        assert_eq!(bin.len(), 5 * 5 * 6 * 8);

        let meta = fs::read_to_string(out.join("frames.jsonl")).unwrap();
        let rows: Vec<serde_json::Value> = meta
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["step"], 0);
        assert_eq!(rows[0]["max"], 1.0);

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("run.json")).unwrap()).unwrap();
        assert_eq!(summary["mode"], "wave");
        assert_eq!(summary["frames"], 5);
        assert_eq!(summary["config"]["physics"]["mode"], "wave");

        fs::remove_dir_all(&out).unwrap();
    }
}
