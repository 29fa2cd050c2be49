use thiserror::Error;

pub type Result<T> = std::result::Result<T, RocError>;

#[derive(Debug, Error)]
pub enum RocError {
    /// Curve or interval undefined for the given labels (one class absent, empty input).
    #[error("degenerate input{}: {reason}", group_suffix(.group))]
    DegenerateInput {
        group: Option<String>,
        reason: String,
    },

    #[error("group `{group}` has no rows in column `{column}`")]
    EmptyGroup { group: String, column: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl RocError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        RocError::DegenerateInput {
            group: None,
            reason: reason.into(),
        }
    }

    /// Attaches the group key to estimator errors raised without one.
    pub fn with_group(self, key: &str) -> Self {
        match self {
            RocError::DegenerateInput { group: None, reason } => RocError::DegenerateInput {
                group: Some(key.to_string()),
                reason,
            },
            other => other,
        }
    }
}

fn group_suffix(group: &Option<String>) -> String {
    match group {
        Some(g) => format!(" for group `{g}`"),
        None => String::new(),
    }
}
