use polars::prelude::DataFrame;
use tracing::info;

use crate::aggregate::{aggregate_by_year, genre_aggregate, releases_per_year, GenreAgg};
use crate::cleaning::clean;
use crate::columns::{BUDGET, GENRE, POPULARITY, REVENUE, ROI, RUNTIME, TITLE, VOTE_AVERAGE};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::genres::explode_genres;
use crate::ranking::{filter_above, top_n, SortOrder};
use crate::stats::{correlation_matrix, missing_value_counts};

/// Every table produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub missing_values: DataFrame,
    pub cleaned: DataFrame,
    pub yearly: DataFrame,
    pub releases_per_year: DataFrame,
    pub genre_rows: DataFrame,
    pub top_roi: DataFrame,
    pub top_popularity: DataFrame,
    pub top_revenue: DataFrame,
    pub top_budget: DataFrame,
    pub top_genres: DataFrame,
    pub genre_vote_average: DataFrame,
    pub genre_runtime: DataFrame,
    pub long_movies: DataFrame,
    pub correlations: DataFrame,
}

/// A named view of one report table. `columns` lists what a presentation
/// layer should show; empty means all of them.
#[derive(Debug, Clone, Copy)]
pub struct ReportTable<'a> {
    pub name: &'static str,
    pub frame: &'a DataFrame,
    pub columns: &'static [&'static str],
}

impl<'a> ReportTable<'a> {
    pub fn new(
        name: &'static str,
        frame: &'a DataFrame,
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            frame,
            columns,
        }
    }
}

impl PipelineReport {
    /// Tables worth presenting, in report order. The cleaned and exploded
    /// frames are omitted.
    pub fn tables(&self) -> Vec<ReportTable<'_>> {
        let table = ReportTable::new;
        vec![
            table("missing_values", &self.missing_values, &[]),
            table("yearly_budget_revenue", &self.yearly, &[]),
            table("releases_per_year", &self.releases_per_year, &[]),
            table("top_roi", &self.top_roi, &[TITLE, ROI]),
            table("top_popularity", &self.top_popularity, &[TITLE, POPULARITY]),
            table("top_revenue", &self.top_revenue, &[TITLE, REVENUE]),
            table("top_budget", &self.top_budget, &[TITLE, BUDGET]),
            table("top_genres", &self.top_genres, &[]),
            table("genre_vote_average", &self.genre_vote_average, &[]),
            table("genre_runtime", &self.genre_runtime, &[]),
            table("long_movies", &self.long_movies, &[TITLE, RUNTIME]),
            table("correlations", &self.correlations, &[]),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovieMetricsPipeline {
    config: PipelineConfig,
}

impl MovieMetricsPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cleans the raw movie table and derives every report view from it.
    pub fn run(&self, raw: &DataFrame) -> Result<PipelineReport> {
        self.config.validate()?;
        let config = &self.config;

        let missing_values = missing_value_counts(raw)?;
        let cleaned = clean(raw)?;

        let yearly = aggregate_by_year(&cleaned)?;
        let per_year = releases_per_year(&cleaned)?;
        let genre_rows = explode_genres(&cleaned)?;
        info!(
            years = yearly.height(),
            genre_rows = genre_rows.height(),
            "aggregated movie records"
        );

        let top_roi = top_n(&cleaned, ROI, config.top_roi, SortOrder::Descending)?;
        let top_popularity = top_n(
            &cleaned,
            POPULARITY,
            config.top_popularity,
            SortOrder::Descending,
        )?;
        let top_revenue = top_n(&cleaned, REVENUE, config.top_revenue, SortOrder::Descending)?;
        let top_budget = top_n(&cleaned, BUDGET, config.top_budget, SortOrder::Descending)?;

        let top_genres = genre_aggregate(&genre_rows, GENRE, GenreAgg::Count, config.top_genres)?;
        let genre_vote_average = genre_aggregate(
            &genre_rows,
            VOTE_AVERAGE,
            GenreAgg::Mean,
            config.genre_vote_top_k,
        )?;
        let genre_runtime = genre_aggregate(
            &genre_rows,
            RUNTIME,
            GenreAgg::Mean,
            config.genre_runtime_top_k,
        )?;

        let long = filter_above(&cleaned, RUNTIME, config.long_runtime_minutes)?;
        let long_movies = top_n(
            &long,
            RUNTIME,
            config.long_movies_limit,
            SortOrder::Descending,
        )?;

        let features: Vec<&str> = config
            .correlation_features
            .iter()
            .map(String::as_str)
            .collect();
        let correlations = correlation_matrix(&cleaned, &features)?;

        info!(
            rows = cleaned.height(),
            long_movies = long_movies.height(),
            "pipeline run complete"
        );

        Ok(PipelineReport {
            missing_values,
            cleaned,
            yearly,
            releases_per_year: per_year,
            genre_rows,
            top_roi,
            top_popularity,
            top_revenue,
            top_budget,
            top_genres,
            genre_vote_average,
            genre_runtime,
            long_movies,
            correlations,
        })
    }
}
