use super::config::ScoringConfig;
use super::rules::ComponentScores;
use crate::domain::RiskClassification;

/// Weighted sum of the component scores, clamped to 0-100 and rounded to the
/// nearest tenth. Classification runs on the rounded value.
pub(crate) fn combine(components: &ComponentScores, config: &ScoringConfig) -> f64 {
    let combined = components.traffic * config.traffic_weight
        + components.weather * config.weather_weight
        + components.demand * config.demand_weight;

    round_one_decimal(combined.clamp(0.0, 100.0))
}

pub(crate) fn classify(risk_score: f64, config: &ScoringConfig) -> RiskClassification {
    config.classification_bounds.classify(risk_score)
}

/// Nearest tenth of the f64 value. Exact binary ties such as 30.25 go away from
/// zero; a decimal literal like 30.05 is stored just below the tie and rounds down.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
