use super::views::{
    ClassificationCount, ClassificationTrendEntry, RiskRunSummary, TierAlertCount, TopCityEntry,
};
use crate::domain::{AlertRow, CityTier, RiskClassification, ScoredRow};
use crate::scoring::RiskAssessment;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

pub(crate) const TOP_CITY_LIMIT: usize = 10;
pub(crate) const TREND_DAYS: usize = 7;

pub fn summarize(assessment: &RiskAssessment) -> RiskRunSummary {
    let scored = &assessment.scored;

    let cities: HashSet<&str> = scored.iter().map(|row| row.city.as_str()).collect();
    let first_date = scored.iter().map(|row| row.date).min();
    let last_date = scored.iter().map(|row| row.date).max();

    let mut by_class: HashMap<RiskClassification, usize> = HashMap::new();
    for row in scored
        .iter()
        .filter(|row| Some(row.date) == assessment.alert_date)
    {
        *by_class.entry(row.risk_classification).or_default() += 1;
    }

    let distribution = RiskClassification::ordered()
        .into_iter()
        .map(|classification| ClassificationCount {
            classification,
            label: classification.label(),
            count: by_class.get(&classification).copied().unwrap_or(0),
        })
        .collect();

    let mut by_tier: HashMap<CityTier, usize> = HashMap::new();
    for alert in &assessment.alerts {
        *by_tier.entry(alert.city_tier).or_default() += 1;
    }

    let alerts_by_tier = CityTier::ordered()
        .into_iter()
        .filter_map(|tier| {
            by_tier.get(&tier).map(|alerts| TierAlertCount {
                tier,
                label: tier.label(),
                alerts: *alerts,
            })
        })
        .collect();

    // First alert wins ties so the pick follows source order.
    let highest_risk_city = assessment
        .alerts
        .iter()
        .fold(None, |best: Option<&AlertRow>, alert| match best {
            Some(current) if current.risk_score >= alert.risk_score => Some(current),
            _ => Some(alert),
        })
        .map(|alert| alert.city.clone());

    RiskRunSummary {
        top_cities: top_cities(scored, assessment.alert_date),
        classification_trend: classification_trend(scored),
        cities_monitored: cities.len(),
        first_date,
        last_date,
        alert_date: assessment.alert_date,
        distribution,
        alerts_by_tier,
        alert_count: assessment.alerts.len(),
        highest_risk_city,
        scored_rows: scored.len(),
        rejected_rows: assessment.rejected.len(),
    }
}

/// Highest-scoring rows on the alert date; ties keep source order.
fn top_cities(scored: &[ScoredRow], alert_date: Option<NaiveDate>) -> Vec<TopCityEntry> {
    let mut rows: Vec<&ScoredRow> = scored
        .iter()
        .filter(|row| Some(row.date) == alert_date)
        .collect();
    rows.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    rows.into_iter()
        .take(TOP_CITY_LIMIT)
        .map(|row| TopCityEntry {
            city: row.city.clone(),
            city_tier: row.city_tier,
            risk_score: row.risk_score,
            risk_classification: row.risk_classification,
            traffic_risk: row.traffic_risk,
            weather_risk: row.weather_risk,
            demand_risk: row.demand_risk,
        })
        .collect()
}

/// Low/Medium/High counts for the most recent dates in the scored table, oldest first.
fn classification_trend(scored: &[ScoredRow]) -> Vec<ClassificationTrendEntry> {
    let mut by_date: BTreeMap<NaiveDate, ClassificationTrendEntry> = BTreeMap::new();
    for row in scored {
        let entry = by_date
            .entry(row.date)
            .or_insert_with(|| ClassificationTrendEntry::empty(row.date));
        match row.risk_classification {
            RiskClassification::Low => entry.low += 1,
            RiskClassification::Medium => entry.medium += 1,
            RiskClassification::High => entry.high += 1,
        }
    }

    let skip = by_date.len().saturating_sub(TREND_DAYS);
    by_date.into_values().skip(skip).collect()
}
