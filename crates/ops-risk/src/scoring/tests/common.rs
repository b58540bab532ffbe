use chrono::NaiveDate;

use crate::domain::{CityTier, FeatureRecord, FeatureRow};
use crate::scoring::{RiskEngine, ScoringConfig};

pub(super) fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(ScoringConfig::default()).expect("default config validates")
}

pub(super) fn engine_with(config: ScoringConfig) -> RiskEngine {
    RiskEngine::new(config).expect("config validates")
}

/// Dry, free-flowing day with ordinary demand.
pub(super) fn calm_row(city: &str, date: NaiveDate) -> FeatureRow {
    FeatureRow {
        date,
        city: city.to_string(),
        city_tier: CityTier::Tier2,
        congestion_level: 0.25,
        congestion_level_7d_avg: 0.22,
        rainfall_mm: 1.0,
        temperature: 27.0,
        demand_index: 0.4,
    }
}

/// Monsoon day in Mumbai: heavy rain on top of peak-hour congestion.
pub(super) fn mumbai_monsoon() -> FeatureRow {
    FeatureRow {
        date: day(31),
        city: "Mumbai".to_string(),
        city_tier: CityTier::Tier1,
        congestion_level: 0.85,
        congestion_level_7d_avg: 0.70,
        rainfall_mm: 42.5,
        temperature: 29.0,
        demand_index: 0.60,
    }
}

pub(super) fn gridlock_row(city: &str, date: NaiveDate) -> FeatureRow {
    FeatureRow {
        date,
        city: city.to_string(),
        city_tier: CityTier::Tier1,
        congestion_level: 0.92,
        congestion_level_7d_avg: 0.81,
        rainfall_mm: 18.0,
        temperature: 31.0,
        demand_index: 0.88,
    }
}

pub(super) fn record_from(row: &FeatureRow) -> FeatureRecord {
    FeatureRecord {
        date: row.date,
        city: row.city.clone(),
        city_tier: Some(row.city_tier),
        congestion_level: Some(row.congestion_level),
        congestion_level_7d_avg: Some(row.congestion_level_7d_avg),
        rainfall_mm: Some(row.rainfall_mm),
        temperature: Some(row.temperature),
        demand_index: Some(row.demand_index),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
