use std::fmt::Write;

use crate::report::{AucSummaryRow, Figure, format_f64_6};

pub fn render_summary_tsv(rows: &[AucSummaryRow]) -> String {
    let mut out = String::new();
    out.push_str("panel\tgroup\tn\tpositives\tnegatives\tauc\tci_low\tci_high\tconfidence\n");
    for r in rows {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.panel.as_deref().unwrap_or(""),
            r.group,
            r.n,
            r.positives,
            r.negatives,
            format_f64_6(r.auc),
            format_f64_6(r.ci_low),
            format_f64_6(r.ci_high),
            r.confidence
        );
    }
    out
}

pub fn render_report_text(figure: &Figure, rows: &[AucSummaryRow]) -> String {
    let mut out = String::new();
    out.push_str("ROC Analysis Report\n");
    out.push_str("===================\n\n");
    let _ = writeln!(out, "Figure: {}", figure.title());
    let _ = writeln!(out, "Panels: {}", figure.panels().len());
    let _ = writeln!(out, "Curves: {}\n", rows.len());

    let mut current: Option<&str> = None;
    for r in rows {
        if let Some(panel) = r.panel.as_deref()
            && current != Some(panel)
        {
            let _ = writeln!(out, "[{}]", panel);
            current = Some(panel);
        }
        let _ = writeln!(
            out,
            "  {}: AUC {:.3} ({:.0}% CI {:.3}-{:.3}), n={} ({} positive / {} negative)",
            r.group,
            r.auc,
            r.confidence * 100.0,
            r.ci_low,
            r.ci_high,
            r.n,
            r.positives,
            r.negatives
        );
    }

    if let Some(best) = rows.iter().max_by(|a, b| a.auc.total_cmp(&b.auc)) {
        let _ = writeln!(out, "\nHighest AUC: {} ({:.3})", best.group, best.auc);
    }
    out
}
