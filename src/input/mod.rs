use serde::{Deserialize, Serialize};

use crate::error::{Result, RocError};

pub mod demo;
pub mod table;

pub use table::{load_table, write_table};

const MISSING_TOKENS: &[&str] = &["", "na", "nan", "null", "none", "n/a"];

/// One labelled score. `truth` is the binary label, `score` the classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub group_id: String,
    pub truth: bool,
    pub score: f64,
}

impl ScoreRecord {
    pub fn new(group_id: impl Into<String>, truth: bool, score: f64) -> Self {
        Self {
            group_id: group_id.into(),
            truth,
            score,
        }
    }
}

/// Names of the group, truth and score columns inside a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreColumns {
    pub group: String,
    pub truth: String,
    pub score: String,
}

impl Default for ScoreColumns {
    fn default() -> Self {
        Self {
            group: "Dataset".to_string(),
            truth: "true".to_string(),
            score: "score".to_string(),
        }
    }
}

/// Column-named string table. Cells stay untyped until records are extracted.
/// Every row has one cell per column; each row remembers its source line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    lines: Vec<usize>,
}

impl DataTable {
    /// Rows are numbered as if read from a file with a header on line 1.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let lines = (2..rows.len() + 2).collect();
        Self::with_lines(columns, rows, lines)
    }

    pub(crate) fn with_lines(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        lines: Vec<usize>,
    ) -> Result<Self> {
        for (row, &line) in rows.iter().zip(&lines) {
            if row.len() != columns.len() {
                return Err(RocError::Parse {
                    line,
                    message: format!(
                        "expected {} fields, found {}",
                        columns.len(),
                        row.len()
                    ),
                });
            }
        }
        Ok(Self {
            columns,
            rows,
            lines,
        })
    }

    /// Builds a three-column table (group, truth, score) from records.
    pub fn from_records(records: &[ScoreRecord], columns: &ScoreColumns) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.group_id.clone(),
                    if r.truth { "1" } else { "0" }.to_string(),
                    r.score.to_string(),
                ]
            })
            .collect();
        Self {
            columns: vec![
                columns.group.clone(),
                columns.truth.clone(),
                columns.score.clone(),
            ],
            rows,
            lines: (2..records.len() + 2).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Source line of each row, in row order.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RocError::MissingColumn(name.to_string()))
    }

    /// Distinct values of `column` in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        let idx = self.column_index(column)?;
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            let value = &row[idx];
            if !out.iter().any(|v| v == value) {
                out.push(value.clone());
            }
        }
        Ok(out)
    }

    /// Distinct values of `column` over rows whose truth and score are both
    /// present, in order of first appearance. Unparseable cells count as
    /// present so extraction can report them.
    pub fn scorable_values(&self, column: &str, score: &ScoreColumns) -> Result<Vec<String>> {
        let idx = self.column_index(column)?;
        let truth_idx = self.column_index(&score.truth)?;
        let score_idx = self.column_index(&score.score)?;
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            let missing = matches!(parse_truth(&row[truth_idx]), Ok(None))
                || matches!(parse_score(&row[score_idx]), Ok(None));
            if !missing && !out.iter().any(|v| v == &row[idx]) {
                out.push(row[idx].clone());
            }
        }
        Ok(out)
    }

    /// Rows whose `column` equals `value`, as a new table with the same columns.
    /// Source lines are kept.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<DataTable> {
        let idx = self.column_index(column)?;
        let mut rows = Vec::new();
        let mut lines = Vec::new();
        for (row, &line) in self.rows.iter().zip(&self.lines) {
            if row[idx] == value {
                rows.push(row.clone());
                lines.push(line);
            }
        }
        Ok(DataTable {
            columns: self.columns.clone(),
            rows,
            lines,
        })
    }

    /// Extracts score records. Rows with a missing truth or score are excluded.
    pub fn score_records(&self, columns: &ScoreColumns) -> Result<Vec<ScoreRecord>> {
        let group_idx = self.column_index(&columns.group)?;
        let truth_idx = self.column_index(&columns.truth)?;
        let score_idx = self.column_index(&columns.score)?;

        let mut records = Vec::with_capacity(self.rows.len());
        let mut excluded = 0usize;
        for (row, &line) in self.rows.iter().zip(&self.lines) {
            let truth = parse_truth(&row[truth_idx]).map_err(|message| RocError::Parse {
                line,
                message: format!("column `{}`: {message}", columns.truth),
            })?;
            let score = parse_score(&row[score_idx]).map_err(|message| RocError::Parse {
                line,
                message: format!("column `{}`: {message}", columns.score),
            })?;
            match (truth, score) {
                (Some(truth), Some(score)) => records.push(ScoreRecord {
                    group_id: row[group_idx].clone(),
                    truth,
                    score,
                }),
                _ => excluded += 1,
            }
        }
        if excluded > 0 {
            tracing::warn!(
                excluded,
                kept = records.len(),
                "rows with missing truth or score excluded"
            );
        }
        Ok(records)
    }
}

/// Coerces a truth cell to a label. `Ok(None)` marks a missing value.
pub fn parse_truth(raw: &str) -> std::result::Result<Option<bool>, String> {
    let value = raw.trim();
    if is_missing(value) {
        return Ok(None);
    }
    match value.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Ok(Some(true)),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Ok(Some(false)),
        _ => Err(format!("truth value `{value}` is not binary")),
    }
}

/// Parses a score cell. `Ok(None)` marks a missing value (including NaN).
pub fn parse_score(raw: &str) -> std::result::Result<Option<f64>, String> {
    let value = raw.trim();
    if is_missing(value) {
        return Ok(None);
    }
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("score value `{value}` is not numeric"))?;
    if parsed.is_nan() {
        return Ok(None);
    }
    Ok(Some(parsed))
}

fn is_missing(value: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

/// Distinct group ids in order of first appearance.
pub fn group_keys(records: &[ScoreRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in records {
        if !out.iter().any(|k| k == &r.group_id) {
            out.push(r.group_id.clone());
        }
    }
    out
}

/// Truth and score vectors for one group, in record order.
pub fn group_vectors(records: &[ScoreRecord], key: &str) -> (Vec<bool>, Vec<f64>) {
    let mut truth = Vec::new();
    let mut score = Vec::new();
    for r in records.iter().filter(|r| r.group_id == key) {
        truth.push(r.truth);
        score.push(r.score);
    }
    (truth, score)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
