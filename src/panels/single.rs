use serde::{Deserialize, Serialize};

use crate::error::{Result, RocError};
use crate::input::ScoreRecord;
use crate::model::{AucResult, IntervalConfig};
use crate::panels::spine::roc_spine;
use crate::panels::style::{
    AnnotationPosition, Color, LineStyle, validate_font, validate_line, validate_size,
    validate_title_font,
};
use crate::panels::{
    CurveTrace, Facet, GridLayout, Legend, LegendEntry, Panel, PanelKind, check_color_count,
    estimate_group, legend_font, resolve_colors, resolve_group_keys,
};

const MAX_PRECISION: usize = 8;

/// Faceted layout: one set of axes per group, shared axis scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub title: String,
    /// Applied positionally to the requested groups; empty means palette.
    pub colors: Vec<Color>,
    pub line_width: f64,
    pub alpha: f64,
    pub base_font: f64,
    pub title_font: Option<f64>,
    pub x_label: String,
    pub y_label: String,
    pub annotate: bool,
    pub annotation_position: AnnotationPosition,
    pub precision: usize,
    pub columns: usize,
    pub panel_size: (f64, f64),
    pub legend_title: String,
    pub legend_font_delta: f64,
    pub fixed_minor_ticks: bool,
    pub interval: IntervalConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "ROC Curve Panels".to_string(),
            colors: Vec::new(),
            line_width: 2.0,
            alpha: 1.0,
            base_font: 20.0,
            title_font: None,
            x_label: "Specificity (%)".to_string(),
            y_label: "Sensitivity (%)".to_string(),
            annotate: true,
            annotation_position: AnnotationPosition::LowerRight,
            precision: 2,
            columns: 3,
            panel_size: (5.0, 5.0),
            legend_title: "AUC".to_string(),
            legend_font_delta: -6.0,
            fixed_minor_ticks: true,
            interval: IntervalConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Checks everything that does not depend on the data, plus the color count.
    pub fn validate(&self, n_groups: usize) -> Result<()> {
        if self.columns == 0 {
            return Err(RocError::Configuration(
                "facet column count must be at least 1".to_string(),
            ));
        }
        if self.precision > MAX_PRECISION {
            return Err(RocError::Configuration(format!(
                "decimal precision {} exceeds {}",
                self.precision, MAX_PRECISION
            )));
        }
        validate_line(self.line_width, self.alpha)?;
        validate_font(self.base_font)?;
        validate_title_font(self.title_font)?;
        validate_size("panel size", self.panel_size)?;
        check_color_count(&self.colors, n_groups)?;
        self.interval.validate()
    }
}

/// `AUC = 0.87 (95% CI 0.80-0.93)` at the given precision.
pub fn format_auc_label(auc: &AucResult, precision: usize) -> String {
    format!(
        "AUC = {:.p$} ({:.0}% CI {:.p$}-{:.p$})",
        auc.point_estimate,
        auc.confidence * 100.0,
        auc.ci_low,
        auc.ci_high,
        p = precision
    )
}

pub fn render_panel(
    records: &[ScoreRecord],
    group_keys: Option<&[String]>,
    config: &PanelConfig,
) -> Result<Panel> {
    let keys = resolve_group_keys(records, group_keys)?;
    config.validate(keys.len())?;
    let colors = resolve_colors(&config.colors, keys.len())?;

    let layout = GridLayout::for_count(keys.len(), config.columns, config.panel_size);
    let facet_title_font = config.title_font.unwrap_or(config.base_font);
    let line = LineStyle::solid(config.line_width, config.alpha);

    let mut facets = Vec::with_capacity(keys.len());
    for (idx, (key, color)) in keys.iter().zip(colors).enumerate() {
        let (curve, auc) = estimate_group(records, key, &config.interval)?;
        let (row, col) = layout.cell(idx);
        let legend = config.annotate.then(|| Legend {
            title: config.legend_title.clone(),
            entries: vec![LegendEntry {
                group: key.clone(),
                label: format_auc_label(&auc, config.precision),
                color,
            }],
            position: config.annotation_position,
            font_size: legend_font(config.base_font, config.legend_font_delta),
            title_font_size: legend_font(config.base_font, config.legend_font_delta + 2.0),
        });
        facets.push(Facet {
            title: key.clone(),
            title_font_size: facet_title_font,
            row,
            col,
            traces: vec![CurveTrace {
                group: key.clone(),
                color,
                line,
                curve,
                auc,
            }],
            legend,
        });
    }

    tracing::info!(
        facets = facets.len(),
        rows = layout.rows,
        columns = layout.columns,
        "rendered faceted ROC panel"
    );

    Ok(Panel {
        kind: PanelKind::Faceted,
        title: config.title.clone(),
        title_font_size: config.title_font.unwrap_or(config.base_font + 4.0),
        layout,
        spine: roc_spine(
            &config.x_label,
            &config.y_label,
            config.base_font,
            config.fixed_minor_ticks,
        ),
        facets,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/single.rs"]
mod tests;
