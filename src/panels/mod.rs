use serde::Serialize;

use crate::error::{Result, RocError};
use crate::input::{ScoreRecord, group_keys, group_vectors};
use crate::model::{AucResult, IntervalConfig, RocCurve, compute_ci_with, compute_curve};

pub mod overlay;
pub mod single;
pub mod spine;
pub mod style;

pub use overlay::{OverlayConfig, render_overlay};
pub use single::{PanelConfig, render_panel};
pub use spine::RocSpine;
pub use style::{AnnotationPosition, Color, LineStyle};

/// Column name reported by record-level renderers in `EmptyGroup` errors.
pub const RECORD_GROUP_COLUMN: &str = "group_id";
const MIN_LEGEND_FONT: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Faceted,
    Overlay,
}

/// One group's curve as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveTrace {
    pub group: String,
    pub color: Color,
    pub line: LineStyle,
    pub curve: RocCurve,
    pub auc: AucResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub group: String,
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
    pub position: AnnotationPosition,
    pub font_size: f64,
    pub title_font_size: f64,
}

/// A single set of axes. Faceted panels hold one facet per group; overlay
/// panels hold exactly one facet with every trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    pub title: String,
    pub title_font_size: f64,
    pub row: usize,
    pub col: usize,
    pub traces: Vec<CurveTrace>,
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    /// Size of one grid cell in inches (width, height).
    pub cell_size: (f64, f64),
}

impl GridLayout {
    pub fn for_count(n: usize, columns: usize, cell_size: (f64, f64)) -> Self {
        Self {
            rows: n.div_ceil(columns).max(1),
            columns,
            cell_size,
        }
    }

    pub fn figure_size(&self) -> (f64, f64) {
        (
            self.cell_size.0 * self.columns as f64,
            self.cell_size.1 * self.rows as f64,
        )
    }

    /// Row-major cell of the `idx`-th item.
    pub fn cell(&self, idx: usize) -> (usize, usize) {
        (idx / self.columns, idx % self.columns)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub title_font_size: f64,
    pub layout: GridLayout,
    pub spine: RocSpine,
    pub facets: Vec<Facet>,
}

impl Panel {
    pub fn traces(&self) -> impl Iterator<Item = &CurveTrace> {
        self.facets.iter().flat_map(|f| f.traces.iter())
    }

    pub fn trace(&self, group: &str) -> Option<&CurveTrace> {
        self.traces().find(|t| t.group == group)
    }

    /// Grid cells left blank after the last facet.
    pub fn empty_cells(&self) -> usize {
        self.layout.rows * self.layout.columns - self.facets.len()
    }

    /// Groups in drawing order.
    pub fn groups(&self) -> Vec<&str> {
        self.traces().map(|t| t.group.as_str()).collect()
    }
}

/// Requested keys, or every group in first-appearance order. Every requested
/// key must have rows; the first missing one is reported.
pub(crate) fn resolve_group_keys(
    records: &[ScoreRecord],
    requested: Option<&[String]>,
) -> Result<Vec<String>> {
    let keys = match requested {
        None => group_keys(records),
        Some(keys) => {
            if let Some(missing) = keys
                .iter()
                .find(|k| !records.iter().any(|r| &r.group_id == *k))
            {
                return Err(RocError::EmptyGroup {
                    group: missing.clone(),
                    column: RECORD_GROUP_COLUMN.to_string(),
                });
            }
            keys.to_vec()
        }
    };
    if keys.is_empty() {
        return Err(RocError::Configuration("no groups to render".to_string()));
    }
    Ok(keys)
}

/// Explicit colors applied positionally, or an evenly spaced palette.
pub(crate) fn resolve_colors(explicit: &[Color], n_groups: usize) -> Result<Vec<Color>> {
    if explicit.is_empty() {
        return Ok(style::evenly_spaced_palette(n_groups));
    }
    check_color_count(explicit, n_groups)?;
    Ok(explicit.to_vec())
}

pub(crate) fn check_color_count(explicit: &[Color], n_groups: usize) -> Result<()> {
    if !explicit.is_empty() && explicit.len() != n_groups {
        return Err(RocError::Configuration(format!(
            "{} colors given for {} groups",
            explicit.len(),
            n_groups
        )));
    }
    Ok(())
}

pub(crate) fn estimate_group(
    records: &[ScoreRecord],
    key: &str,
    interval: &IntervalConfig,
) -> Result<(RocCurve, AucResult)> {
    let (truth, score) = group_vectors(records, key);
    let curve = compute_curve(&truth, &score).map_err(|e| e.with_group(key))?;
    let auc = compute_ci_with(&truth, &score, interval).map_err(|e| e.with_group(key))?;
    tracing::debug!(
        group = key,
        n = truth.len(),
        auc = auc.point_estimate,
        ci_low = auc.ci_low,
        ci_high = auc.ci_high,
        "estimated ROC"
    );
    Ok((curve, auc))
}

pub(crate) fn legend_font(base_font: f64, delta: f64) -> f64 {
    (base_font + delta).max(MIN_LEGEND_FONT)
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
