use thiserror::Error;

/// Hard failures. Empty results (no data, no outliers, short history) are
/// ordinary return values of the views, not errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input table lacks a column the views depend on.
    #[error("input is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("unknown rating field `{0}` (expected one of: {1})")]
    UnknownRating(String, String),

    #[error("cannot parse date `{0}`")]
    InvalidDate(String),
}

impl ReportError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
