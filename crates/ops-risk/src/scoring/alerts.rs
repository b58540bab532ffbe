use super::config::AlertThresholds;
use crate::domain::{AlertRow, RiskClassification, ScoredRow};
use chrono::NaiveDate;

pub(crate) const FALLBACK_REASON: &str = "Elevated combined risk";

/// Explains a high-risk row by naming each component whose raw value crossed its
/// alert threshold, in traffic, weather, demand order.
pub(crate) fn alert_reason(row: &ScoredRow, thresholds: &AlertThresholds) -> String {
    let mut reasons = Vec::new();

    let congestion = row.effective_congestion();
    if congestion >= thresholds.congestion {
        reasons.push(format!("High traffic congestion ({congestion:.2})"));
    }

    if row.rainfall_mm >= thresholds.rainfall_mm {
        reasons.push(format!("Heavy rainfall ({:.1}mm)", row.rainfall_mm));
    }

    if row.demand_index >= thresholds.demand_index {
        reasons.push(format!("High demand ({:.2})", row.demand_index));
    }

    if reasons.is_empty() {
        return FALLBACK_REASON.to_string();
    }

    reasons.join("; ")
}

pub(crate) fn latest_date(rows: &[ScoredRow]) -> Option<NaiveDate> {
    rows.iter().map(|row| row.date).max()
}

/// High rows on `date`, in source order.
pub(crate) fn high_risk_alerts(
    rows: &[ScoredRow],
    date: NaiveDate,
    thresholds: &AlertThresholds,
) -> Vec<AlertRow> {
    rows.iter()
        .filter(|row| row.date == date && row.risk_classification == RiskClassification::High)
        .map(|row| AlertRow {
            date: row.date,
            city: row.city.clone(),
            city_tier: row.city_tier,
            risk_score: row.risk_score,
            risk_classification: row.risk_classification,
            traffic_risk: row.traffic_risk,
            weather_risk: row.weather_risk,
            demand_risk: row.demand_risk,
            alert_reason: alert_reason(row, thresholds),
        })
        .collect()
}
