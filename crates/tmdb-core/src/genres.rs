use polars::prelude::*;
use tracing::debug;

use crate::columns::{require_column, GENRE, GENRE_LIST};
use crate::error::Result;

/// One row per entry of `genre_list`, with the entry in a scalar `genre`
/// column and every other column repeated. Rows with an empty list produce
/// nothing. Output keeps input order.
pub fn explode_genres(df: &DataFrame) -> Result<DataFrame> {
    require_column(df, GENRE_LIST)?.list()?;

    let mut exploded = df.explode([GENRE_LIST])?;
    exploded.rename(GENRE_LIST, GENRE.into())?;

    // polars emits a null entry for an empty list
    let present = exploded.column(GENRE)?.is_not_null();
    let exploded = exploded.filter(&present)?;

    debug!(
        movies = df.height(),
        rows = exploded.height(),
        "exploded genre lists"
    );
    Ok(exploded)
}
