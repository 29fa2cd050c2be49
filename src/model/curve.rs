use serde::Serialize;

use crate::error::{Result, RocError};

/// One step of the threshold sweep. Scores `>= threshold` are called positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub specificity: f64,
    pub sensitivity: f64,
}

/// ROC curve from the (1, 0) corner to the (0, 1) corner, specificity
/// non-increasing and sensitivity non-decreasing along `points`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    pub auc: f64,
    pub positives: usize,
    pub negatives: usize,
}

impl RocCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn specificities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.specificity).collect()
    }

    pub fn sensitivities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sensitivity).collect()
    }

    /// (1 - specificity, sensitivity) pairs, the plotting coordinates.
    pub fn fpr_tpr(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (1.0 - p.specificity, p.sensitivity))
            .collect()
    }
}

pub fn compute_curve(truth: &[bool], score: &[f64]) -> Result<RocCurve> {
    let (positives, negatives) = validate_inputs(truth, score)?;
    let p = positives as f64;
    let n = negatives as f64;

    let mut points = Vec::with_capacity(score.len() + 1);
    points.push(RocPoint {
        threshold: f64::INFINITY,
        specificity: 1.0,
        sensitivity: 0.0,
    });
    let area2 = sweep(truth, score, |threshold, tp, fp| {
        points.push(RocPoint {
            threshold,
            specificity: (negatives - fp) as f64 / n,
            sensitivity: tp as f64 / p,
        });
    });

    Ok(RocCurve {
        points,
        auc: area_to_auc(area2, positives, negatives),
        positives,
        negatives,
    })
}

/// AUC of the curve without materialising its points.
pub fn curve_auc(truth: &[bool], score: &[f64]) -> Result<f64> {
    let (positives, negatives) = validate_inputs(truth, score)?;
    let area2 = sweep(truth, score, |_, _, _| {});
    Ok(area_to_auc(area2, positives, negatives))
}

/// Mann-Whitney estimate with mid-ranks for ties.
pub fn rank_auc(truth: &[bool], score: &[f64]) -> Result<f64> {
    let (positives, negatives) = validate_inputs(truth, score)?;
    let mut order: Vec<usize> = (0..score.len()).collect();
    order.sort_by(|&a, &b| score[a].total_cmp(&score[b]));

    let mut rank_sum_pos = 0.0f64;
    let mut i = 0usize;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && score[order[j + 1]] == score[order[i]] {
            j += 1;
        }
        let mid_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            if truth[idx] {
                rank_sum_pos += mid_rank;
            }
        }
        i = j + 1;
    }

    let p = positives as f64;
    let n = negatives as f64;
    Ok((rank_sum_pos - p * (p + 1.0) / 2.0) / (p * n))
}

/// Returns (positives, negatives) or the reason the curve is undefined.
pub(crate) fn validate_inputs(truth: &[bool], score: &[f64]) -> Result<(usize, usize)> {
    if truth.is_empty() {
        return Err(RocError::degenerate("empty input"));
    }
    if truth.len() != score.len() {
        return Err(RocError::degenerate(format!(
            "truth length {} != score length {}",
            truth.len(),
            score.len()
        )));
    }
    if score.iter().any(|s| s.is_nan()) {
        return Err(RocError::degenerate("score contains NaN"));
    }
    let positives = truth.iter().filter(|&&t| t).count();
    let negatives = truth.len() - positives;
    if positives == 0 {
        return Err(RocError::degenerate("no positive labels"));
    }
    if negatives == 0 {
        return Err(RocError::degenerate("no negative labels"));
    }
    Ok((positives, negatives))
}

/// Walks distinct scores in descending order, calling `on_step(threshold, tp, fp)`
/// once per distinct score. Tied scores form a single step. Returns twice the
/// trapezoid area in count units.
fn sweep(truth: &[bool], score: &[f64], mut on_step: impl FnMut(f64, usize, usize)) -> u128 {
    let mut order: Vec<usize> = (0..score.len()).collect();
    order.sort_by(|&a, &b| score[b].total_cmp(&score[a]));

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut area2: u128 = 0;
    let mut i = 0usize;
    while i < order.len() {
        let threshold = score[order[i]];
        let (prev_tp, prev_fp) = (tp, fp);
        while i < order.len() && score[order[i]] == threshold {
            if truth[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        area2 += ((fp - prev_fp) as u128) * ((tp + prev_tp) as u128);
        on_step(threshold, tp, fp);
    }
    area2
}

fn area_to_auc(area2: u128, positives: usize, negatives: usize) -> f64 {
    area2 as f64 / (2.0 * positives as f64 * negatives as f64)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/curve.rs"]
mod tests;
