use super::bands::BandTable;
use super::tiers::default_city_tier_map;
use crate::domain::{CityTier, RiskClassification};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Rule table driving the risk engine. Every field falls back to the production
/// defaults when omitted from a JSON override file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub traffic_weight: f64,
    pub weather_weight: f64,
    pub demand_weight: f64,
    pub traffic_bands: BandTable,
    pub rainfall_bands: BandTable,
    pub demand_bands: BandTable,
    pub temperature: TemperatureAdjustment,
    pub classification_bounds: ClassificationBounds,
    pub alert_thresholds: AlertThresholds,
    pub city_tier_map: HashMap<String, CityTier>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            traffic_weight: 0.40,
            weather_weight: 0.35,
            demand_weight: 0.25,
            traffic_bands: BandTable::traffic(),
            rainfall_bands: BandTable::rainfall(),
            demand_bands: BandTable::demand(),
            temperature: TemperatureAdjustment::default(),
            classification_bounds: ClassificationBounds::default(),
            alert_thresholds: AlertThresholds::default(),
            city_tier_map: default_city_tier_map(),
        }
    }
}

impl ScoringConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (component, value) in [
            ("traffic", self.traffic_weight),
            ("weather", self.weather_weight),
            ("demand", self.demand_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidWeight { component, value });
            }
        }

        let sum = self.traffic_weight + self.weather_weight + self.demand_weight;
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigurationError::WeightSum { sum });
        }

        self.traffic_bands.validate("traffic")?;
        self.rainfall_bands.validate("rainfall")?;
        self.demand_bands.validate("demand")?;
        self.temperature.validate()?;
        self.classification_bounds.validate()?;
        self.alert_thresholds.validate()?;

        Ok(())
    }
}

/// Flat additive points for cold and hot days on top of the rainfall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureAdjustment {
    pub cold_below: f64,
    pub cold_points: f64,
    pub hot_above: f64,
    pub hot_points: f64,
}

impl Default for TemperatureAdjustment {
    fn default() -> Self {
        Self {
            cold_below: 10.0,
            cold_points: 10.0,
            hot_above: 40.0,
            hot_points: 15.0,
        }
    }
}

impl TemperatureAdjustment {
    pub fn points(&self, temperature: f64) -> f64 {
        if temperature < self.cold_below {
            self.cold_points
        } else if temperature > self.hot_above {
            self.hot_points
        } else {
            0.0
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for points in [self.cold_points, self.hot_points] {
            if !points.is_finite() || !(0.0..=100.0).contains(&points) {
                return Err(ConfigurationError::TemperaturePoints { points });
            }
        }

        // Cold and hot must stay mutually exclusive.
        if !self.cold_below.is_finite()
            || !self.hot_above.is_finite()
            || self.cold_below > self.hot_above
        {
            return Err(ConfigurationError::OverlappingTemperatureAdjustments {
                cold_below: self.cold_below,
                hot_above: self.hot_above,
            });
        }

        Ok(())
    }
}

/// Cut points separating Low/Medium/High. Scores equal to a cut point belong to the
/// lower band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationBounds {
    pub low: f64,
    pub medium: f64,
}

impl Default for ClassificationBounds {
    fn default() -> Self {
        Self {
            low: 30.0,
            medium: 60.0,
        }
    }
}

impl ClassificationBounds {
    pub fn classify(&self, risk_score: f64) -> RiskClassification {
        if risk_score <= self.low {
            RiskClassification::Low
        } else if risk_score <= self.medium {
            RiskClassification::Medium
        } else {
            RiskClassification::High
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let ordered = self.low.is_finite()
            && self.medium.is_finite()
            && 0.0 <= self.low
            && self.low < self.medium
            && self.medium <= 100.0;

        if ordered {
            Ok(())
        } else {
            Err(ConfigurationError::ClassificationBounds {
                low: self.low,
                medium: self.medium,
            })
        }
    }
}

/// Raw-value cutoffs deciding which components an alert explanation mentions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub congestion: f64,
    pub rainfall_mm: f64,
    pub demand_index: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            congestion: 0.6,
            rainfall_mm: 15.0,
            demand_index: 0.7,
        }
    }
}

impl AlertThresholds {
    fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("congestion", self.congestion),
            ("rainfall_mm", self.rainfall_mm),
            ("demand_index", self.demand_index),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::AlertThreshold { name, value });
            }
        }
        Ok(())
    }
}

/// Rejected scoring configuration. Raised before any row is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("risk weights must sum to 1.0 (found {sum:.4})")]
    WeightSum { sum: f64 },
    #[error("{component} weight must be a finite, non-negative number (found {value})")]
    InvalidWeight { component: &'static str, value: f64 },
    #[error("{table} bands must not be empty")]
    EmptyBands { table: &'static str },
    #[error("{table} band {index} lower bound {lower} must be greater than {previous}")]
    NonMonotonicBands {
        table: &'static str,
        index: usize,
        lower: f64,
        previous: f64,
    },
    #[error("{table} band {index} must map into 0-100 with floor <= ceiling (found {floor}..{ceiling})")]
    BandScoreRange {
        table: &'static str,
        index: usize,
        floor: f64,
        ceiling: f64,
    },
    #[error("{table} ceiling {ceiling} must exceed the last lower bound {last_lower}")]
    BandCeiling {
        table: &'static str,
        ceiling: f64,
        last_lower: f64,
    },
    #[error("classification bounds must satisfy 0 <= low < medium <= 100 (found {low}, {medium})")]
    ClassificationBounds { low: f64, medium: f64 },
    #[error("cold adjustment below {cold_below} overlaps hot adjustment above {hot_above}")]
    OverlappingTemperatureAdjustments { cold_below: f64, hot_above: f64 },
    #[error("temperature adjustment points must be within 0-100 (found {points})")]
    TemperaturePoints { points: f64 },
    #[error("alert threshold {name} must be finite (found {value})")]
    AlertThreshold { name: &'static str, value: f64 },
    #[error("failed to read scoring configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scoring configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
