use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("header is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("data row on line {line_index} invalid: {message}")]
    DataRow { line_index: u64, message: String },

    #[error("failed to assemble dataframe: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// A genre cell that is not a list of `{id, name}` mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreParseError {
    pub position: usize,
    pub message: String,
}

impl GenreParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed genre list at offset {}: {}",
            self.position, self.message
        )
    }
}

impl std::error::Error for GenreParseError {}
