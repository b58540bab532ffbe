use super::common::*;
use crate::scoring::{BandTable, ScoringConfig};

#[test]
fn traffic_uses_the_higher_of_current_and_rolling_congestion() {
    let engine = engine();
    let mut row = calm_row("Pune", day(10));
    row.congestion_level = 0.2;
    row.congestion_level_7d_avg = 0.7;

    let scored = engine.score(&row);

    assert_close(scored.traffic_risk, 65.0);
}

#[test]
fn cold_and_hot_days_add_flat_weather_points() {
    let engine = engine();

    let mut cold = calm_row("Srinagar", day(10));
    cold.rainfall_mm = 0.0;
    cold.temperature = 4.0;
    assert_close(engine.score(&cold).weather_risk, 10.0);

    let mut hot = calm_row("Nagpur", day(10));
    hot.rainfall_mm = 30.0;
    hot.temperature = 45.5;
    assert_close(engine.score(&hot).weather_risk, 85.0);

    let mut mild = calm_row("Bangalore", day(10));
    mild.rainfall_mm = 0.0;
    mild.temperature = 10.0;
    assert_close(engine.score(&mild).weather_risk, 0.0);
}

#[test]
fn weather_score_is_capped_at_one_hundred() {
    let engine = engine();
    let mut row = calm_row("Jaipur", day(10));
    row.rainfall_mm = 120.0;
    row.temperature = 46.0;

    assert_close(engine.score(&row).weather_risk, 100.0);
}

#[test]
fn demand_surge_band_interpolates_to_one_hundred() {
    let engine = engine();
    let mut row = calm_row("Delhi", day(10));

    row.demand_index = 0.9;
    let surge = engine.score(&row).demand_risk;
    assert!((surge - (60.0 + 40.0 / 3.0)).abs() < 1e-9, "got {surge}");

    row.demand_index = 1.0;
    assert_close(engine.score(&row).demand_risk, 100.0);
}

#[test]
fn out_of_domain_inputs_score_like_their_clamped_values() {
    let engine = engine();

    let mut saturated = calm_row("Kolkata", day(10));
    saturated.congestion_level = 1.5;
    let mut full = saturated.clone();
    full.congestion_level = 1.0;
    assert_eq!(
        engine.score(&saturated).traffic_risk,
        engine.score(&full).traffic_risk
    );

    let mut negative_rain = calm_row("Kolkata", day(10));
    negative_rain.rainfall_mm = -5.0;
    let mut dry = negative_rain.clone();
    dry.rainfall_mm = 0.0;
    assert_eq!(
        engine.score(&negative_rain).weather_risk,
        engine.score(&dry).weather_risk
    );

    let mut overheated_demand = calm_row("Kolkata", day(10));
    overheated_demand.demand_index = 3.0;
    assert_close(engine.score(&overheated_demand).demand_risk, 100.0);
}

#[test]
fn sub_scores_are_continuous_and_non_decreasing_across_the_domain() {
    let config = ScoringConfig::default();
    let sweeps: [(&BandTable, f64, f64); 3] = [
        (&config.traffic_bands, 1.0, 0.001),
        (&config.rainfall_bands, 100.0, 0.01),
        (&config.demand_bands, 1.0, 0.001),
    ];

    for (table, max, step) in sweeps {
        let steps = (max / step) as usize;
        let mut previous = table.score(0.0);
        for i in 1..=steps {
            let current = table.score(i as f64 * step);
            assert!(current >= previous - 1e-9, "score decreased near {}", i as f64 * step);
            assert!(
                current - previous < 0.3,
                "jump of {} near {}",
                current - previous,
                i as f64 * step
            );
            previous = current;
        }
    }
}

#[test]
fn component_scores_stay_within_bounds() {
    let engine = engine();
    for congestion in [-1.0, 0.0, 0.45, 0.99, 2.0] {
        for rainfall in [-3.0, 0.0, 14.9, 80.0, 500.0] {
            for temperature in [-10.0, 9.9, 25.0, 40.1, 55.0] {
                let mut row = calm_row("Surat", day(5));
                row.congestion_level = congestion;
                row.congestion_level_7d_avg = congestion;
                row.rainfall_mm = rainfall;
                row.temperature = temperature;
                row.demand_index = congestion;

                let scored = engine.score(&row);
                for value in [
                    scored.traffic_risk,
                    scored.weather_risk,
                    scored.demand_risk,
                    scored.risk_score,
                ] {
                    assert!((0.0..=100.0).contains(&value), "{value} out of range");
                }
            }
        }
    }
}
