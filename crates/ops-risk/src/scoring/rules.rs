use super::config::ScoringConfig;
use crate::domain::FeatureRow;

/// Per-component sub-scores for a single row, each within 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ComponentScores {
    pub traffic: f64,
    pub weather: f64,
    pub demand: f64,
}

pub(crate) fn score_components(row: &FeatureRow, config: &ScoringConfig) -> ComponentScores {
    ComponentScores {
        traffic: traffic_risk(row, config),
        weather: weather_risk(row, config),
        demand: demand_risk(row, config),
    }
}

pub(crate) fn traffic_risk(row: &FeatureRow, config: &ScoringConfig) -> f64 {
    config
        .traffic_bands
        .score(row.effective_congestion())
        .clamp(0.0, 100.0)
}

pub(crate) fn weather_risk(row: &FeatureRow, config: &ScoringConfig) -> f64 {
    let rainfall = config.rainfall_bands.score(row.rainfall_mm);
    let temperature = config.temperature.points(row.temperature);
    (rainfall + temperature).clamp(0.0, 100.0)
}

pub(crate) fn demand_risk(row: &FeatureRow, config: &ScoringConfig) -> f64 {
    config
        .demand_bands
        .score(row.demand_index)
        .clamp(0.0, 100.0)
}
