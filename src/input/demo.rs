use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::input::{ScoreColumns, ScoreRecord};
use crate::panels::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct DemoDataset {
    pub name: &'static str,
    pub positive_mean: f64,
    pub color: Color,
}

const DEMO_DATASETS: &[DemoDataset] = &[
    DemoDataset {
        name: "Linear_High",
        positive_mean: 3.0,
        color: Color::rgb(0xE6, 0x4B, 0x35),
    },
    DemoDataset {
        name: "Linear_Mid",
        positive_mean: 1.5,
        color: Color::rgb(0x4D, 0xD5, 0x76),
    },
    DemoDataset {
        name: "Linear_Low",
        positive_mean: 0.5,
        color: Color::rgb(0x1C, 0x97, 0xCC),
    },
];

pub fn demo_datasets() -> &'static [DemoDataset] {
    DEMO_DATASETS
}

pub fn demo_columns() -> ScoreColumns {
    ScoreColumns::default()
}

/// High / Mid / Low separability demo: `n / 2` negatives ~ N(0, 1) followed by
/// `n / 2` positives ~ N(mean, 1) per dataset.
pub fn demo_records(n: usize, seed: u64) -> Vec<ScoreRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = n / 2;
    let mut out = Vec::with_capacity(half * 2 * DEMO_DATASETS.len());
    for ds in DEMO_DATASETS {
        for _ in 0..half {
            out.push(ScoreRecord::new(ds.name, false, standard_normal(&mut rng)));
        }
        for _ in 0..half {
            out.push(ScoreRecord::new(
                ds.name,
                true,
                ds.positive_mean + standard_normal(&mut rng),
            ));
        }
    }
    out
}

/// Box-Muller draw.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
