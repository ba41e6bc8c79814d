use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Schema,
    Parse,
    Render,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file access error: could not read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("file access error: could not write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("schema error: missing required column(s): {}", quoted(.0))]
    MissingColumns(Vec<String>),
    #[error("schema error: row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("parse error: {0}")]
    Parse(#[from] csv::Error),
    #[error("render error: values of column '{0}' are too far apart to draw")]
    RangeOverflow(String),
    #[error("render error: {0}")]
    Render(String),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::ReadInput { .. } | ConvertError::WriteOutput { .. } => {
                ErrorKind::FileAccess
            }
            ConvertError::MissingColumns(_) | ConvertError::InvalidValue { .. } => {
                ErrorKind::Schema
            }
            ConvertError::Parse(_) => ErrorKind::Parse,
            ConvertError::RangeOverflow(_) | ConvertError::Render(_) => ErrorKind::Render,
        }
    }

    /// wraps any drawing backend failure
    pub(crate) fn render<E: std::fmt::Display>(e: E) -> ConvertError {
        ConvertError::Render(e.to_string())
    }
}

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_every_column() {
        let e = ConvertError::MissingColumns(vec![
            "Elapsed time (s)".to_string(),
            "Requests per second".to_string(),
        ]);
        assert_eq!(e.kind(), ErrorKind::Schema);
        assert_eq!(
            e.to_string(),
            "schema error: missing required column(s): 'Elapsed time (s)', 'Requests per second'"
        );
    }

    #[test]
    fn io_errors_are_file_access() {
        let e = ConvertError::ReadInput {
            path: PathBuf::from("nope.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(e.kind(), ErrorKind::FileAccess);
        assert!(e.to_string().starts_with("file access error: could not read nope.csv"));
    }
}
