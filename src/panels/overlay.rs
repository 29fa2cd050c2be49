use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::ScoreRecord;
use crate::model::IntervalConfig;
use crate::panels::spine::roc_spine;
use crate::panels::style::{
    AnnotationPosition, Color, LineStyle, validate_font, validate_line, validate_size,
    validate_title_font,
};
use crate::panels::{
    CurveTrace, Facet, GridLayout, Legend, LegendEntry, Panel, PanelKind, check_color_count,
    estimate_group, legend_font, resolve_colors, resolve_group_keys,
};

/// Every group in one set of axes, legend ordered by descending AUC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub title: String,
    /// Applied positionally to the groups in input order; empty means palette.
    pub colors: Vec<Color>,
    pub line_width: f64,
    pub alpha: f64,
    pub base_font: f64,
    pub title_font: Option<f64>,
    pub x_label: String,
    pub y_label: String,
    pub figure_size: (f64, f64),
    pub legend_title: String,
    pub legend_font_delta: f64,
    pub legend_position: AnnotationPosition,
    pub fixed_minor_ticks: bool,
    pub interval: IntervalConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "ROC Curve Comparison".to_string(),
            colors: Vec::new(),
            line_width: 2.5,
            alpha: 1.0,
            base_font: 22.0,
            title_font: None,
            x_label: "Specificity (%)".to_string(),
            y_label: "Sensitivity (%)".to_string(),
            figure_size: (8.0, 8.0),
            legend_title: "AUC".to_string(),
            legend_font_delta: -7.0,
            legend_position: AnnotationPosition::Anchor { x: 0.78, y: 0.20 },
            fixed_minor_ticks: true,
            interval: IntervalConfig::default(),
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self, n_groups: usize) -> Result<()> {
        validate_line(self.line_width, self.alpha)?;
        validate_font(self.base_font)?;
        validate_title_font(self.title_font)?;
        validate_size("figure size", self.figure_size)?;
        check_color_count(&self.colors, n_groups)?;
        self.interval.validate()
    }
}

pub fn overlay_label(group: &str, auc: f64) -> String {
    format!("{group} (AUC = {auc:.2})")
}

pub fn render_overlay(
    records: &[ScoreRecord],
    group_keys: Option<&[String]>,
    config: &OverlayConfig,
) -> Result<Panel> {
    let keys = resolve_group_keys(records, group_keys)?;
    config.validate(keys.len())?;
    // Colors follow input order, before the AUC sort.
    let colors = resolve_colors(&config.colors, keys.len())?;
    let line = LineStyle::solid(config.line_width, config.alpha);

    let mut traces = Vec::with_capacity(keys.len());
    for (key, color) in keys.iter().zip(colors) {
        let (curve, auc) = estimate_group(records, key, &config.interval)?;
        traces.push(CurveTrace {
            group: key.clone(),
            color,
            line,
            curve,
            auc,
        });
    }
    traces.sort_by(|a, b| b.auc.point_estimate.total_cmp(&a.auc.point_estimate));

    let entries = traces
        .iter()
        .map(|t| LegendEntry {
            group: t.group.clone(),
            label: overlay_label(&t.group, t.auc.point_estimate),
            color: t.color,
        })
        .collect();
    let title_font_size = config.title_font.unwrap_or(config.base_font);
    let legend = Legend {
        title: config.legend_title.clone(),
        entries,
        position: config.legend_position,
        font_size: legend_font(config.base_font, config.legend_font_delta),
        title_font_size: legend_font(config.base_font, config.legend_font_delta + 3.0),
    };

    tracing::info!(curves = traces.len(), "rendered overlay ROC panel");

    Ok(Panel {
        kind: PanelKind::Overlay,
        title: config.title.clone(),
        title_font_size,
        layout: GridLayout::for_count(1, 1, config.figure_size),
        spine: roc_spine(
            &config.x_label,
            &config.y_label,
            config.base_font,
            config.fixed_minor_ticks,
        ),
        facets: vec![Facet {
            title: config.title.clone(),
            title_font_size,
            row: 0,
            col: 0,
            traces,
            legend: Some(legend),
        }],
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/overlay.rs"]
mod tests;
