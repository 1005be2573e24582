use std::path::Path;

use serde::Deserialize;

use crate::columns::{
    BUDGET, POPULARITY, REVENUE, ROI, RUNTIME, VOTE_AVERAGE, VOTE_COUNT,
};
use crate::error::{PipelineError, Result};

/// Ranking sizes and thresholds for a report run. Every field has a default,
/// so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub top_roi: usize,
    pub top_popularity: usize,
    pub top_revenue: usize,
    pub top_budget: usize,
    pub top_genres: usize,
    pub genre_vote_top_k: usize,
    pub genre_runtime_top_k: usize,
    pub long_runtime_minutes: f64,
    pub long_movies_limit: usize,
    pub correlation_features: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_roi: 10,
            top_popularity: 15,
            top_revenue: 10,
            top_budget: 10,
            top_genres: 10,
            genre_vote_top_k: 8,
            genre_runtime_top_k: 8,
            long_runtime_minutes: 180.0,
            long_movies_limit: 10,
            correlation_features: [
                BUDGET,
                REVENUE,
                POPULARITY,
                VOTE_AVERAGE,
                VOTE_COUNT,
                RUNTIME,
                ROI,
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.long_runtime_minutes.is_finite() {
            return Err(PipelineError::Config(
                "long_runtime_minutes must be a finite number".into(),
            ));
        }
        if self.correlation_features.is_empty() {
            return Err(PipelineError::Config(
                "correlation_features must name at least one column".into(),
            ));
        }
        Ok(())
    }
}
