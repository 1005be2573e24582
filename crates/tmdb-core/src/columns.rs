use polars::prelude::*;

use crate::error::{PipelineError, Result};

pub use tmdb_parser::schema::{
    BUDGET, GENRES, POPULARITY, RELEASE_DATE, REVENUE, RUNTIME, TITLE, VOTE_AVERAGE,
    VOTE_COUNT,
};

pub const RELEASE_YEAR: &str = "release_year";
pub const ROI: &str = "roi";
pub const GENRE_LIST: &str = "genre_list";
pub const GENRE: &str = "genre";

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| PipelineError::Validation(format!("unknown column '{name}'")))
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Fails with [`PipelineError::Validation`] unless `name` exists and holds numbers.
pub(crate) fn require_numeric(df: &DataFrame, name: &str) -> Result<()> {
    let dtype = require_column(df, name)?.dtype();
    if is_numeric(dtype) {
        Ok(())
    } else {
        Err(PipelineError::Validation(format!(
            "column '{name}' is not numeric ({dtype})"
        )))
    }
}

/// `name` as Float64 with NaN turned into null.
pub(crate) fn numeric(name: &str) -> Expr {
    let value = col(name).cast(DataType::Float64);
    when(value.clone().is_nan())
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(value)
        .alias(name)
}

pub(crate) fn numeric_series(df: &DataFrame, name: &str) -> Result<Series> {
    require_numeric(df, name)?;
    let selected = df.clone().lazy().select([numeric(name)]).collect()?;
    Ok(selected.column(name)?.as_materialized_series().clone())
}

pub(crate) fn row_limit(n: usize) -> IdxSize {
    IdxSize::try_from(n).unwrap_or(IdxSize::MAX)
}
