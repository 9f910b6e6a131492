use std::f64::consts::PI;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IcType {
    /// One interior cell raised at the centre.
    Pulse,
    /// Fundamental mode of a rim-clamped plate, `sin(pi y) sin(pi x)`.
    Dome,
    /// One to three interior cells raised at seeded positions.
    Presses,
}

impl IcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcType::Pulse => "pulse",
            IcType::Dome => "dome",
            IcType::Presses => "presses",
        }
    }
}

/// Fill a `rows x cols` field with a pattern peaking at 1.
pub fn generate_ic<R: Rng>(rng: &mut R, rows: usize, cols: usize, ic: IcType) -> Vec<f64> {
    let mut f = vec![0.0f64; rows * cols];

    match ic {
        IcType::Pulse => {
            f[(rows / 2) * cols + cols / 2] = 1.0;
        }

        IcType::Dome => {
            let (fr, fc) = ((rows - 1) as f64, (cols - 1) as f64);
            for y in 1..(rows - 1) {
                let sy = (PI * y as f64 / fr).sin();
                for x in 1..(cols - 1) {
                    f[y * cols + x] = sy * (PI * x as f64 / fc).sin();
                }
            }
        }

        IcType::Presses => {
            let presses = rng.gen_range(1..=3);
            for _ in 0..presses {
                let y = rng.gen_range(1..rows - 1);
                let x = rng.gen_range(1..cols - 1);
                f[y * cols + x] += rng.gen_range(0.5..1.0);
            }
        }
    }

    scale_to_unit_peak(&mut f);
    f
}

/// Zero the outer ring, for membranes clamped flat at the rim.
pub fn zero_edges(f: &mut [f64], rows: usize, cols: usize) {
    for x in 0..cols {
        f[x] = 0.0;
        f[(rows - 1) * cols + x] = 0.0;
    }
    for y in 0..rows {
        f[y * cols] = 0.0;
        f[y * cols + (cols - 1)] = 0.0;
    }
}

fn scale_to_unit_peak(f: &mut [f64]) {
    let mx = f.iter().copied().fold(0.0f64, f64::max);
    if mx > 0.0 {
        for v in f.iter_mut() {
            *v /= mx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const ALL: [IcType; 3] = [IcType::Pulse, IcType::Dome, IcType::Presses];

    #[test]
    fn same_seed_same_field() {
        for ic in ALL {
            let a = generate_ic(&mut ChaCha8Rng::seed_from_u64(7), 12, 9, ic);
            let b = generate_ic(&mut ChaCha8Rng::seed_from_u64(7), 12, 9, ic);
            assert_eq!(a, b, "{}", ic.as_str());
        }
    }

    #[test]
    fn peak_is_one_and_rim_is_flat() {
        for ic in ALL {
            // Smallest grid with an interior.
            for (rows, cols) in [(3, 3), (16, 24)] {
                let f = generate_ic(&mut ChaCha8Rng::seed_from_u64(1), rows, cols, ic);
                assert_eq!(f.len(), rows * cols);
                assert!(f.iter().all(|v| (0.0..=1.0).contains(v)), "{}", ic.as_str());
                let mx = f.iter().copied().fold(0.0, f64::max);
                assert!((mx - 1.0).abs() < 1e-12, "{} peak {}", ic.as_str(), mx);

                let mut rimless = f.clone();
                zero_edges(&mut rimless, rows, cols);
                assert_eq!(rimless, f, "{} touches the rim", ic.as_str());
            }
        }
    }

    #[test]
    fn pulse_sits_in_the_middle() {
        let f = generate_ic(&mut ChaCha8Rng::seed_from_u64(0), 5, 7, IcType::Pulse);
        assert_eq!(f[2 * 7 + 3], 1.0);
        assert_eq!(f.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn dome_is_symmetric() {
        let (rows, cols) = (7, 9);
        let f = generate_ic(&mut ChaCha8Rng::seed_from_u64(0), rows, cols, IcType::Dome);
        assert_eq!(f[3 * cols + 4], 1.0);
        for y in 0..rows {
            for x in 0..cols {
                let mirrored = f[(rows - 1 - y) * cols + (cols - 1 - x)];
                assert!((f[y * cols + x] - mirrored).abs() < 1e-12, "({y}, {x})");
            }
        }
    }

    #[test]
    fn presses_are_few_and_seeded() {
        let f = generate_ic(&mut ChaCha8Rng::seed_from_u64(3), 10, 10, IcType::Presses);
        let raised = f.iter().filter(|&&v| v > 0.0).count();
        assert!((1..=3).contains(&raised));

        let differs = (4..20u64)
            .map(|s| generate_ic(&mut ChaCha8Rng::seed_from_u64(s), 10, 10, IcType::Presses))
            .any(|g| g != f);
        assert!(differs);
    }

    #[test]
    fn edges_zeroed() {
        let mut f = vec![1.0; 4 * 5];
        zero_edges(&mut f, 4, 5);
        assert_eq!(f.iter().sum::<f64>(), 2.0 * 3.0);
    }
}
