use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::compose::CompositeFigure;
use crate::error::Result;
use crate::panels::Panel;

pub mod json;
pub mod svg;
pub mod text;

/// Anything the reports can write: one panel, or a composite of panels.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "figure", rename_all = "snake_case")]
pub enum Figure {
    Panel(Panel),
    Composite(CompositeFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Panel(p) => &p.title,
            Figure::Composite(c) => &c.title,
        }
    }

    /// (composite key, panel) pairs; the key is `None` for a lone panel.
    pub fn panels(&self) -> Vec<(Option<&str>, &Panel)> {
        match self {
            Figure::Panel(p) => vec![(None, p)],
            Figure::Composite(c) => c
                .panels
                .iter()
                .map(|gp| (Some(gp.key.as_str()), &gp.panel))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AucSummaryRow {
    pub panel: Option<String>,
    pub group: String,
    pub n: usize,
    pub positives: usize,
    pub negatives: usize,
    pub auc: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub confidence: f64,
}

pub fn summary_rows(figure: &Figure) -> Vec<AucSummaryRow> {
    let mut rows = Vec::new();
    for (key, panel) in figure.panels() {
        for trace in panel.traces() {
            rows.push(AucSummaryRow {
                panel: key.map(str::to_string),
                group: trace.group.clone(),
                n: trace.curve.positives + trace.curve.negatives,
                positives: trace.curve.positives,
                negatives: trace.curve.negatives,
                auc: trace.auc.point_estimate,
                ci_low: trace.auc.ci_low,
                ci_high: trace.auc.ci_high,
                confidence: trace.auc.confidence,
            });
        }
    }
    rows
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub svg: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

pub fn write_reports(figure: &Figure, out_dir: &Path) -> Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;
    let rows = summary_rows(figure);

    let paths = ReportPaths {
        json: out_dir.join("figure.json"),
        svg: out_dir.join("figure.svg"),
        summary: out_dir.join("auc_summary.tsv"),
        report: out_dir.join("report.txt"),
    };

    write_text(&paths.json, &json::render_figure_json(figure)?)?;
    write_text(&paths.svg, &svg::render_figure_svg(figure)?)?;
    write_text(&paths.summary, &text::render_summary_tsv(&rows))?;
    write_text(&paths.report, &text::render_report_text(figure, &rows))?;

    tracing::info!(out_dir = %out_dir.display(), groups = rows.len(), "reports written");
    Ok(paths)
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
