pub mod aggregate;
pub mod cleaning;
pub mod columns;
pub mod config;
pub mod error;
pub mod genres;
pub mod pipelines;
pub mod ranking;
pub mod stats;

pub use aggregate::{aggregate_by_year, genre_aggregate, releases_per_year, GenreAgg};
pub use cleaning::{clean, compute_roi, impute_runtime, parse_dates_and_filter, parse_genres};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use genres::explode_genres;
pub use pipelines::{MovieMetricsPipeline, PipelineReport, ReportTable};
pub use ranking::{filter_above, top_n, SortOrder};
