// crates/tmdb-core/src/error.rs

use thiserror::Error;
use tmdb_parser::{GenreParseError, ParserError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset could not be loaded: {0}")]
    Loader(#[from] ParserError),

    #[error("Genre list in row {row} ({title}) is malformed: {source}")]
    Parse {
        row: usize,
        title: String,
        #[source]
        source: GenreParseError,
    },

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
