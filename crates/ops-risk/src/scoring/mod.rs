//! Rule-based operational risk engine.
//!
//! Feature rows flow through three stages: component scoring against band tables,
//! weighted aggregation with classification, and alert reasoning for the high-risk
//! rows of the latest date.

mod alerts;
mod bands;
mod config;
mod policy;
mod rules;
mod tiers;

#[cfg(test)]
mod tests;

pub use bands::{BandTable, RiskBand};
pub use config::{
    AlertThresholds, ClassificationBounds, ConfigurationError, ScoringConfig,
    TemperatureAdjustment,
};
pub use tiers::default_city_tier_map;

use crate::domain::{
    AlertRow, CityTier, FeatureRecord, FeatureRow, MissingFeatureError, RiskClassification,
    ScoredRow,
};
use crate::report::{summarize, RiskRunSummary};
use chrono::NaiveDate;
use serde::Serialize;
use tiers::TierLookup;
use tracing::{debug, info, warn};

/// Stateless evaluator applying a validated [`ScoringConfig`] to feature rows.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: ScoringConfig,
    tiers: TierLookup,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::from_validated(ScoringConfig::default())
    }
}

impl RiskEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        debug!(
            traffic_weight = config.traffic_weight,
            weather_weight = config.weather_weight,
            demand_weight = config.demand_weight,
            cities = config.city_tier_map.len(),
            "risk engine configured"
        );
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: ScoringConfig) -> Self {
        let tiers = TierLookup::new(&config.city_tier_map);
        Self { config, tiers }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn city_tier(&self, city: &str) -> CityTier {
        self.tiers.tier_for(city)
    }

    pub fn classify(&self, risk_score: f64) -> RiskClassification {
        policy::classify(risk_score, &self.config)
    }

    /// Checks that every scoring input is present and finite. Out-of-domain values
    /// pass through untouched; the band tables clamp them.
    pub fn prepare(
        &self,
        row: usize,
        record: &FeatureRecord,
    ) -> Result<FeatureRow, MissingFeatureError> {
        let require = |field: &'static str, value: Option<f64>| {
            value
                .filter(|value| value.is_finite())
                .ok_or_else(|| MissingFeatureError {
                    row,
                    city: record.city.clone(),
                    date: record.date,
                    field,
                })
        };

        Ok(FeatureRow {
            date: record.date,
            city: record.city.clone(),
            city_tier: record
                .city_tier
                .unwrap_or_else(|| self.city_tier(&record.city)),
            congestion_level: require("congestion_level", record.congestion_level)?,
            congestion_level_7d_avg: require(
                "congestion_level_7d_avg",
                record.congestion_level_7d_avg,
            )?,
            rainfall_mm: require("rainfall_mm", record.rainfall_mm)?,
            temperature: require("temperature", record.temperature)?,
            demand_index: require("demand_index", record.demand_index)?,
        })
    }

    pub fn score(&self, row: &FeatureRow) -> ScoredRow {
        let components = rules::score_components(row, &self.config);
        let risk_score = policy::combine(&components, &self.config);

        ScoredRow {
            date: row.date,
            city: row.city.clone(),
            city_tier: row.city_tier,
            traffic_risk: components.traffic,
            weather_risk: components.weather,
            demand_risk: components.demand,
            risk_score,
            risk_classification: self.classify(risk_score),
            congestion_level: row.congestion_level,
            congestion_level_7d_avg: row.congestion_level_7d_avg,
            rainfall_mm: row.rainfall_mm,
            temperature: row.temperature,
            demand_index: row.demand_index,
        }
    }

    /// High-risk alerts for `date`, or for the latest date in `scored` when `None`.
    pub fn alerts(&self, scored: &[ScoredRow], date: Option<NaiveDate>) -> Vec<AlertRow> {
        match date.or_else(|| alerts::latest_date(scored)) {
            Some(date) => {
                alerts::high_risk_alerts(scored, date, &self.config.alert_thresholds)
            }
            None => Vec::new(),
        }
    }

    pub fn assess(&self, records: &[FeatureRecord]) -> RiskAssessment {
        self.assess_for_date(records, None)
    }

    /// Scores every record and collects rows with missing inputs instead of aborting.
    pub fn assess_for_date(
        &self,
        records: &[FeatureRecord],
        alert_date: Option<NaiveDate>,
    ) -> RiskAssessment {
        let mut scored = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match self.prepare(index, record) {
                Ok(row) => scored.push(self.score(&row)),
                Err(err) => {
                    warn!(
                        row = index,
                        city = %err.city,
                        date = %err.date,
                        field = err.field,
                        "skipping feature row"
                    );
                    rejected.push(err);
                }
            }
        }

        let alert_date = alert_date.or_else(|| alerts::latest_date(&scored));
        let alerts = self.alerts(&scored, alert_date);

        info!(
            scored = scored.len(),
            rejected = rejected.len(),
            alerts = alerts.len(),
            alert_date = ?alert_date,
            "risk assessment complete"
        );

        RiskAssessment {
            alert_date,
            scored,
            alerts,
            rejected,
        }
    }
}

/// Output of one engine run: the daily risk table, the alert table and the rows
/// that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub alert_date: Option<NaiveDate>,
    pub scored: Vec<ScoredRow>,
    pub alerts: Vec<AlertRow>,
    pub rejected: Vec<MissingFeatureError>,
}

impl RiskAssessment {
    pub fn summary(&self) -> RiskRunSummary {
        summarize(self)
    }
}
