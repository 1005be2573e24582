use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info, warn};

use tmdb_parser::{parse_genre_names, parse_release_date};

use crate::columns::{
    numeric, numeric_series, require_column, require_numeric, BUDGET, GENRES, GENRE_LIST,
    RELEASE_DATE, RELEASE_YEAR, REVENUE, ROI, RUNTIME, TITLE,
};
use crate::error::{PipelineError, Result};

/// Runs the cleaning stages in order: runtime imputation, release date parsing,
/// ROI, genre parsing.
pub fn clean(raw: &DataFrame) -> Result<DataFrame> {
    info!(rows = raw.height(), "cleaning movie records");
    let imputed = impute_runtime(raw)?;
    let dated = parse_dates_and_filter(&imputed)?;
    let with_roi = compute_roi(&dated)?;
    let cleaned = parse_genres(&with_roi)?;
    info!(rows = cleaned.height(), "cleaned movie records");
    Ok(cleaned)
}

/// Replaces missing runtimes with the median of the present ones.
///
/// Fails with [`PipelineError::MissingData`] when no row has a runtime.
pub fn impute_runtime(df: &DataFrame) -> Result<DataFrame> {
    let runtimes = numeric_series(df, RUNTIME)?;
    let fill = runtimes.median().ok_or_else(|| {
        PipelineError::MissingData(format!(
            "cannot impute {RUNTIME}: none of {} rows has a value",
            runtimes.len()
        ))
    })?;

    let output = df
        .clone()
        .lazy()
        .with_column(numeric(RUNTIME).fill_null(lit(fill)).alias(RUNTIME))
        .collect()?;
    debug!(
        median = fill,
        imputed = runtimes.null_count(),
        "imputed missing runtimes"
    );
    Ok(output)
}

/// Parses `release_date` into a polars `Date`, adds `release_year`, and drops
/// every row whose date is missing or unparseable.
pub fn parse_dates_and_filter(df: &DataFrame) -> Result<DataFrame> {
    let raw = require_column(df, RELEASE_DATE)?.cast(&DataType::String)?;
    let dates: Vec<Option<NaiveDate>> = raw
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_release_date))
        .collect();

    let mut parsed = df.clone();
    parsed.with_column(Series::new(RELEASE_DATE.into(), dates))?;

    let output = parsed
        .lazy()
        .filter(col(RELEASE_DATE).is_not_null())
        .with_column(col(RELEASE_DATE).dt().year().alias(RELEASE_YEAR))
        .collect()?;

    let dropped = df.height() - output.height();
    if dropped > 0 {
        warn!(dropped, "dropped rows without a parseable release date");
    }
    Ok(output)
}

/// Adds `roi = (revenue - budget) / budget`.
///
/// Rows without a positive budget get 0, as do rows where the ratio is not a
/// finite number (missing revenue, overflow).
pub fn compute_roi(df: &DataFrame) -> Result<DataFrame> {
    require_numeric(df, BUDGET)?;
    require_numeric(df, REVENUE)?;

    let ratio = (numeric(REVENUE) - numeric(BUDGET)) / numeric(BUDGET);
    let roi = when(numeric(BUDGET).gt(lit(0.0)).and(ratio.clone().is_finite()))
        .then(ratio)
        .otherwise(lit(0.0))
        .alias(ROI);

    Ok(df.clone().lazy().with_column(roi).collect()?)
}

/// Adds `genre_list`, the genre names of each row in source order.
///
/// A missing cell becomes an empty list. A malformed cell aborts with
/// [`PipelineError::Parse`].
pub fn parse_genres(df: &DataFrame) -> Result<DataFrame> {
    let len = df.height();
    let genres = require_column(df, GENRES)?.str()?;
    let titles = require_column(df, TITLE)?.str()?;

    let mut builder = ListStringChunkedBuilder::new(GENRE_LIST.into(), len, len * 3);
    for idx in 0..len {
        let names = match genres.get(idx) {
            Some(text) => parse_genre_names(text).map_err(|source| PipelineError::Parse {
                row: idx,
                title: titles.get(idx).unwrap_or("<untitled>").to_string(),
                source,
            })?,
            None => Vec::new(),
        };
        builder.append_values_iter(names.iter().map(String::as_str));
    }

    let mut output = df.clone();
    output.with_column(builder.finish().into_series())?;
    Ok(output)
}
