use std::collections::HashSet;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::*;
use tracing::{debug, info};

use crate::errors::ParserError;
use crate::schema::{
    BUDGET, GENRES, MOVIE_COLUMNS, POPULARITY, RELEASE_DATE, REVENUE, RUNTIME, TITLE,
    VOTE_AVERAGE, VOTE_COUNT,
};

/// Position of each required column in the source header, plus every other
/// distinct header kept as text.
#[derive(Debug, Clone)]
struct ColumnLayout {
    title: usize,
    budget: usize,
    revenue: usize,
    runtime: usize,
    release_date: usize,
    popularity: usize,
    vote_average: usize,
    vote_count: usize,
    genres: usize,
    extras: Vec<(usize, String)>,
}

fn header_name(header: &str) -> &str {
    header.trim().trim_start_matches('\u{feff}')
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParserError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|header| header_name(header) == column)
                .ok_or(ParserError::MissingColumn { column })
        };

        let mut seen: HashSet<&str> = MOVIE_COLUMNS.into_iter().collect();
        let extras = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| {
                let name = header_name(header);
                (!name.is_empty() && seen.insert(name)).then(|| (idx, name.to_string()))
            })
            .collect();

        Ok(Self {
            title: find(TITLE)?,
            budget: find(BUDGET)?,
            revenue: find(REVENUE)?,
            runtime: find(RUNTIME)?,
            release_date: find(RELEASE_DATE)?,
            popularity: find(POPULARITY)?,
            vote_average: find(VOTE_AVERAGE)?,
            vote_count: find(VOTE_COUNT)?,
            genres: find(GENRES)?,
            extras,
        })
    }
}

#[derive(Debug, Default)]
struct MovieColumns {
    title: Vec<Option<String>>,
    budget: Vec<Option<f64>>,
    revenue: Vec<Option<f64>>,
    runtime: Vec<Option<f64>>,
    release_date: Vec<Option<String>>,
    popularity: Vec<Option<f64>>,
    vote_average: Vec<Option<f64>>,
    vote_count: Vec<Option<i64>>,
    genres: Vec<Option<String>>,
    extras: Vec<(String, Vec<Option<String>>)>,
}

impl MovieColumns {
    fn new(layout: &ColumnLayout) -> Self {
        Self {
            extras: layout
                .extras
                .iter()
                .map(|(_, name)| (name.clone(), Vec::new()))
                .collect(),
            ..Self::default()
        }
    }

    fn push_record(
        &mut self,
        layout: &ColumnLayout,
        record: &StringRecord,
        line_index: u64,
    ) -> Result<(), ParserError> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        self.title.push(optional_text(cell(layout.title)));
        self.budget
            .push(parse_optional_f64(cell(layout.budget), line_index, BUDGET)?);
        self.revenue
            .push(parse_optional_f64(cell(layout.revenue), line_index, REVENUE)?);
        self.runtime
            .push(parse_optional_f64(cell(layout.runtime), line_index, RUNTIME)?);
        self.release_date
            .push(optional_text(cell(layout.release_date)));
        self.popularity.push(parse_optional_f64(
            cell(layout.popularity),
            line_index,
            POPULARITY,
        )?);
        self.vote_average.push(parse_optional_f64(
            cell(layout.vote_average),
            line_index,
            VOTE_AVERAGE,
        )?);
        self.vote_count.push(parse_optional_i64(
            cell(layout.vote_count),
            line_index,
            VOTE_COUNT,
        )?);
        self.genres.push(optional_text(cell(layout.genres)));
        for ((idx, _), (_, values)) in layout.extras.iter().zip(self.extras.iter_mut()) {
            values.push(optional_text(cell(*idx)));
        }
        Ok(())
    }

    fn into_dataframe(self) -> Result<DataFrame, ParserError> {
        let mut columns: Vec<Column> = vec![
            Series::new(TITLE.into(), self.title).into(),
            Series::new(BUDGET.into(), self.budget).into(),
            Series::new(REVENUE.into(), self.revenue).into(),
            Series::new(RUNTIME.into(), self.runtime).into(),
            Series::new(RELEASE_DATE.into(), self.release_date).into(),
            Series::new(POPULARITY.into(), self.popularity).into(),
            Series::new(VOTE_AVERAGE.into(), self.vote_average).into(),
            Series::new(VOTE_COUNT.into(), self.vote_count).into(),
            Series::new(GENRES.into(), self.genres).into(),
        ];
        columns.extend(
            self.extras
                .into_iter()
                .map(|(name, values)| Series::new(name.into(), values).into()),
        );
        Ok(DataFrame::new(columns)?)
    }
}

/// Reads a TMDB movies CSV from disk. See [`parse_movies_csv`].
pub fn load_movies_csv(path: impl AsRef<Path>) -> Result<DataFrame, ParserError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let df = parse_movies_csv(&content)?;
    info!(path = %path.display(), rows = df.height(), "loaded movie dataset");
    Ok(df)
}

/// Parses comma-separated movie records into a frame with the columns listed in
/// [`MOVIE_COLUMNS`] first, followed by any other source columns as text in
/// header order.
///
/// Blank cells, and numeric cells spelling `nan`, become nulls. A non-blank
/// numeric cell that does not parse rejects the whole file.
pub fn parse_movies_csv(content: &str) -> Result<DataFrame, ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;
    debug!(?layout, "resolved movie column layout");

    let mut columns = MovieColumns::new(&layout);
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line_index = record.position().map(|pos| pos.line()).unwrap_or(0);
        columns.push_record(&layout, &record, line_index)?;
    }

    columns.into_dataframe()
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_optional_f64(
    value: &str,
    line_index: u64,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|err| ParserError::DataRow {
            line_index,
            message: format!("column {column}: invalid number '{trimmed}': {err}"),
        })?;
    Ok(if parsed.is_nan() { None } else { Some(parsed) })
}

pub(crate) fn parse_optional_i64(
    value: &str,
    line_index: u64,
    column: &str,
) -> Result<Option<i64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }
    // Counts exported through a float column arrive as "123.0".
    match parse_optional_f64(trimmed, line_index, column)? {
        None => Ok(None),
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(Some(value as i64))
        }
        Some(_) => Err(ParserError::DataRow {
            line_index,
            message: format!("column {column}: expected an integer, found '{trimmed}'"),
        }),
    }
}
