mod summary;
pub mod views;
mod writer;

pub use summary::summarize;
pub use views::{
    ClassificationCount, ClassificationTrendEntry, RiskRunSummary, TierAlertCount, TopCityEntry,
};
pub use writer::{write_outputs, OutputError, OutputPaths, ALERTS_FILE, DAILY_RISK_FILE};
