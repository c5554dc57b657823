use std::path::PathBuf;

use thiserror::Error;

/// A single malformed value inside a record or form field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid date-time '{0}': expected yyyyMMdd+HHmm")]
    InvalidDateTime(String),

    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    #[error("expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },
}

/// Errors surfaced by loading and editing a project.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed line in a task or resource file. The load is aborted and
    /// the project is left untouched.
    #[error("error parsing line {line}: {text}")]
    Format {
        line: usize,
        text: String,
        #[source]
        source: FieldError,
    },

    /// Malformed value typed into a form.
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{0}")]
    Validation(String),

    #[error("could not read file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read records")]
    Csv(#[from] csv::Error),
}

impl PlanError {
    /// True for malformed input, whether from a file line or a form field.
    pub fn is_format_error(&self) -> bool {
        matches!(self, PlanError::Format { .. } | PlanError::Field(_))
    }

    /// 1-based line number of the offending record, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            PlanError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
