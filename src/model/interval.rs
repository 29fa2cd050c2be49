use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RocError};
use crate::model::curve::{curve_auc, validate_inputs};
use crate::model::normal::two_sided_z;

pub const DEFAULT_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_RESAMPLES: usize = 2000;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AucResult {
    pub point_estimate: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub confidence: f64,
    /// Bootstrap standard deviation or Hanley-McNeil standard error.
    pub std_error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CiMethod {
    /// Percentile bootstrap over resamples drawn with replacement.
    Bootstrap { resamples: usize, seed: u64 },
    /// Asymptotic standard error of Hanley & McNeil (1982).
    #[serde(rename = "hanley_mcneil")]
    HanleyMcNeil,
}

impl Default for CiMethod {
    fn default() -> Self {
        CiMethod::Bootstrap {
            resamples: DEFAULT_RESAMPLES,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub confidence: f64,
    pub method: CiMethod,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            method: CiMethod::default(),
        }
    }
}

impl IntervalConfig {
    pub fn hanley_mcneil(confidence: f64) -> Self {
        Self {
            confidence,
            method: CiMethod::HanleyMcNeil,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.confidence.is_nan() || self.confidence <= 0.0 || self.confidence >= 1.0 {
            return Err(RocError::Configuration(format!(
                "confidence level {} is outside (0, 1)",
                self.confidence
            )));
        }
        if let CiMethod::Bootstrap { resamples: 0, .. } = self.method {
            return Err(RocError::Configuration(
                "bootstrap needs at least one resample".to_string(),
            ));
        }
        Ok(())
    }
}

/// AUC with a two-sided interval at `confidence`, using the default bootstrap.
pub fn compute_ci(truth: &[bool], score: &[f64], confidence: f64) -> Result<AucResult> {
    compute_ci_with(
        truth,
        score,
        &IntervalConfig {
            confidence,
            ..IntervalConfig::default()
        },
    )
}

pub fn compute_ci_with(truth: &[bool], score: &[f64], config: &IntervalConfig) -> Result<AucResult> {
    config.validate()?;
    let (positives, negatives) = validate_inputs(truth, score)?;
    let auc = curve_auc(truth, score)?;

    let (low, high, std_error) = match config.method {
        CiMethod::Bootstrap { resamples, seed } => {
            bootstrap_bounds(truth, score, config.confidence, resamples, seed)?
        }
        CiMethod::HanleyMcNeil => {
            hanley_mcneil_bounds(auc, positives, negatives, config.confidence)
        }
    };

    // Percentile bounds need not contain the full-sample estimate; widen to it.
    Ok(AucResult {
        point_estimate: auc,
        ci_low: low.min(auc).clamp(0.0, 1.0),
        ci_high: high.max(auc).clamp(0.0, 1.0),
        confidence: config.confidence,
        std_error,
    })
}

fn bootstrap_bounds(
    truth: &[bool],
    score: &[f64],
    confidence: f64,
    resamples: usize,
    seed: u64,
) -> Result<(f64, f64, f64)> {
    let n = truth.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut boot_truth = vec![false; n];
    let mut boot_score = vec![0.0f64; n];
    let mut aucs = Vec::with_capacity(resamples);
    let mut skipped = 0usize;

    for _ in 0..resamples {
        for slot in 0..n {
            let idx = rng.gen_range(0..n);
            boot_truth[slot] = truth[idx];
            boot_score[slot] = score[idx];
        }
        let pos = boot_truth.iter().filter(|&&t| t).count();
        if pos == 0 || pos == n {
            skipped += 1;
            continue;
        }
        aucs.push(curve_auc(&boot_truth, &boot_score)?);
    }

    if aucs.is_empty() {
        return Err(RocError::degenerate(
            "every bootstrap resample contained a single class",
        ));
    }
    if skipped > 0 {
        tracing::debug!(skipped, kept = aucs.len(), "single-class bootstrap resamples skipped");
    }

    aucs.sort_by(|a, b| a.total_cmp(b));
    let alpha = 1.0 - confidence;
    let low = percentile_sorted(&aucs, alpha / 2.0);
    let high = percentile_sorted(&aucs, 1.0 - alpha / 2.0);
    Ok((low, high, std_dev(&aucs)))
}

fn hanley_mcneil_bounds(
    auc: f64,
    positives: usize,
    negatives: usize,
    confidence: f64,
) -> (f64, f64, f64) {
    let n1 = positives as f64;
    let n2 = negatives as f64;
    let q1 = auc / (2.0 - auc);
    let q2 = 2.0 * auc * auc / (1.0 + auc);
    let var = (auc * (1.0 - auc) + (n1 - 1.0) * (q1 - auc * auc) + (n2 - 1.0) * (q2 - auc * auc))
        / (n1 * n2);
    let se = var.max(0.0).sqrt();
    let z = two_sided_z(confidence);
    (auc - z * se, auc + z * se, se)
}

/// Linear interpolation between order statistics; `q` in [0, 1].
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/interval.rs"]
mod tests;
