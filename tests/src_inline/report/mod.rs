use super::*;
use crate::compose::{FacetRenderer, compose};
use crate::input::{DataTable, ScoreRecord};
use crate::model::IntervalConfig;
use crate::panels::{PanelConfig, render_panel};

fn records() -> Vec<ScoreRecord> {
    vec![
        ScoreRecord::new("A", false, 0.1),
        ScoreRecord::new("A", false, 0.4),
        ScoreRecord::new("A", true, 0.35),
        ScoreRecord::new("A", true, 0.8),
        ScoreRecord::new("B", false, 0.2),
        ScoreRecord::new("B", true, 0.9),
    ]
}

fn config() -> PanelConfig {
    PanelConfig {
        interval: IntervalConfig::hanley_mcneil(0.95),
        ..PanelConfig::default()
    }
}

fn panel_figure() -> Figure {
    Figure::Panel(render_panel(&records(), None, &config()).unwrap())
}

#[test]
fn test_summary_rows_for_single_panel() {
    let rows = summary_rows(&panel_figure());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].panel, None);
    assert_eq!(rows[0].group, "A");
    assert_eq!((rows[0].n, rows[0].positives, rows[0].negatives), (4, 2, 2));
    assert!((rows[0].auc - 0.75).abs() < 1e-12);
    assert_eq!(rows[1].auc, 1.0);
}

#[test]
fn test_summary_rows_for_composite_carry_panel_key() {
    let base = DataTable::from_records(&records(), &Default::default());
    let mut columns = base.columns().to_vec();
    columns.push("Batch".to_string());
    let rows = base
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut row = row.clone();
            row.push(if i < 4 { "x" } else { "y" }.to_string());
            row
        })
        .collect();
    let table = DataTable::new(columns, rows).unwrap();
    let renderer = FacetRenderer {
        config: config(),
        ..FacetRenderer::default()
    };
    let figure = Figure::Composite(compose(&table, "Batch", None, &renderer, 2, "T").unwrap());
    let rows = summary_rows(&figure);
    let keys: Vec<(Option<&str>, &str)> = rows
        .iter()
        .map(|r| (r.panel.as_deref(), r.group.as_str()))
        .collect();
    assert_eq!(keys, vec![(Some("x"), "A"), (Some("y"), "B")]);

    let report = text::render_report_text(&figure, &rows);
    assert!(report.contains("Panels: 2"));
    assert!(report.contains("[x]\n  A: AUC 0.750"));
    assert!(report.contains("[y]\n  B: AUC 1.000"));
}

#[test]
fn test_summary_tsv_layout() {
    let rows = summary_rows(&panel_figure());
    let tsv = text::render_summary_tsv(&rows);
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "panel\tgroup\tn\tpositives\tnegatives\tauc\tci_low\tci_high\tconfidence"
    );
    assert!(lines[1].starts_with("\tA\t4\t2\t2\t0.750000\t"));
    assert!(lines[2].starts_with("\tB\t2\t1\t1\t1.000000\t1.000000\t1.000000\t0.95"));
}

#[test]
fn test_report_text_highlights_best() {
    let figure = panel_figure();
    let report = text::render_report_text(&figure, &summary_rows(&figure));
    assert!(report.starts_with("ROC Analysis Report\n"));
    assert!(report.contains("Figure: ROC Curve Panels"));
    assert!(report.contains("A: AUC 0.750 (95% CI "));
    assert!(report.contains("Highest AUC: B (1.000)"));
}

#[test]
fn test_figure_json_shape() {
    let json = json::render_figure_json(&panel_figure()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["figure"], "panel");
    assert_eq!(value["kind"], "faceted");
    let points = &value["facets"][0]["traces"][0]["curve"]["points"];
    assert!(points[0]["threshold"].is_null());
    assert_eq!(points[0]["specificity"], 1.0);
    assert_eq!(value["facets"][1]["traces"][0]["color"].as_str().unwrap().len(), 7);
}

#[test]
fn test_write_reports_creates_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("out");
    let paths = write_reports(&panel_figure(), &out).unwrap();
    for path in [&paths.json, &paths.svg, &paths.summary, &paths.report] {
        assert!(path.exists(), "{}", path.display());
    }
    let svg = std::fs::read_to_string(&paths.svg).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("AUC = 0.75"));
    let tsv = std::fs::read_to_string(&paths.summary).unwrap();
    assert_eq!(tsv.lines().count(), 3);
}
