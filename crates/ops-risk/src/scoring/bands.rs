use super::config::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Contiguous input interval starting at `lower` (inclusive), mapped linearly onto
/// `score_floor..=score_ceiling`. The interval ends where the next band starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub lower: f64,
    pub score_floor: f64,
    pub score_ceiling: f64,
}

impl RiskBand {
    pub const fn new(lower: f64, score_floor: f64, score_ceiling: f64) -> Self {
        Self {
            lower,
            score_floor,
            score_ceiling,
        }
    }
}

/// Piecewise-linear mapping from a raw feature value to a 0-100 sub-score.
///
/// `ceiling` is the input value at which the top band reaches its score ceiling;
/// inputs are clamped to `[bands[0].lower, ceiling]` before lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<RiskBand>,
    pub ceiling: f64,
}

impl BandTable {
    pub fn new(bands: Vec<RiskBand>, ceiling: f64) -> Self {
        Self { bands, ceiling }
    }

    /// Congestion 0-1 with breaks at 0.3, 0.6 and 0.8.
    pub fn traffic() -> Self {
        Self::new(
            vec![
                RiskBand::new(0.0, 0.0, 20.0),
                RiskBand::new(0.3, 20.0, 50.0),
                RiskBand::new(0.6, 50.0, 80.0),
                RiskBand::new(0.8, 80.0, 100.0),
            ],
            1.0,
        )
    }

    /// Rainfall in mm with breaks at 5, 15 and 30; 80 mm and above scores 100.
    pub fn rainfall() -> Self {
        Self::new(
            vec![
                RiskBand::new(0.0, 0.0, 15.0),
                RiskBand::new(5.0, 15.0, 40.0),
                RiskBand::new(15.0, 40.0, 70.0),
                RiskBand::new(30.0, 70.0, 100.0),
            ],
            80.0,
        )
    }

    /// Demand index 0-1 with breaks at 0.5, 0.7 and 0.85.
    pub fn demand() -> Self {
        Self::new(
            vec![
                RiskBand::new(0.0, 0.0, 10.0),
                RiskBand::new(0.5, 10.0, 30.0),
                RiskBand::new(0.7, 30.0, 60.0),
                RiskBand::new(0.85, 60.0, 100.0),
            ],
            1.0,
        )
    }

    pub fn score(&self, value: f64) -> f64 {
        let Some(first) = self.bands.first() else {
            return 0.0;
        };

        let x = value.max(first.lower).min(self.ceiling);
        let index = self
            .bands
            .iter()
            .rposition(|band| x >= band.lower)
            .unwrap_or(0);
        let band = &self.bands[index];
        let upper = self
            .bands
            .get(index + 1)
            .map(|next| next.lower)
            .unwrap_or(self.ceiling);

        let span = upper - band.lower;
        let fraction = if span > 0.0 {
            ((x - band.lower) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };

        band.score_floor + fraction * (band.score_ceiling - band.score_floor)
    }

    pub(crate) fn validate(&self, table: &'static str) -> Result<(), ConfigurationError> {
        let Some(last) = self.bands.last() else {
            return Err(ConfigurationError::EmptyBands { table });
        };

        for (index, band) in self.bands.iter().enumerate() {
            let in_range = |score: f64| score.is_finite() && (0.0..=100.0).contains(&score);
            if !band.lower.is_finite()
                || !in_range(band.score_floor)
                || !in_range(band.score_ceiling)
                || band.score_floor > band.score_ceiling
            {
                return Err(ConfigurationError::BandScoreRange {
                    table,
                    index,
                    floor: band.score_floor,
                    ceiling: band.score_ceiling,
                });
            }

            if index > 0 {
                let previous = self.bands[index - 1].lower;
                if band.lower <= previous {
                    return Err(ConfigurationError::NonMonotonicBands {
                        table,
                        index,
                        lower: band.lower,
                        previous,
                    });
                }
            }
        }

        if !self.ceiling.is_finite() || self.ceiling <= last.lower {
            return Err(ConfigurationError::BandCeiling {
                table,
                ceiling: self.ceiling,
                last_lower: last.lower,
            });
        }

        Ok(())
    }
}
