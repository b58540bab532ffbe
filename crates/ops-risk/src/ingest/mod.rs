//! Feature-frame CSV import.
//!
//! Reads the daily per-city feature table produced upstream. Blank or
//! unparsable numeric cells are kept as `None` so the engine can report them;
//! only structural problems (unreadable file, bad date, missing city) fail
//! the import.

mod normalizer;
mod parser;

pub use normalizer::normalize_city_name;

use crate::domain::FeatureRecord;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum FeatureImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: usize, value: String },
    MissingKey { line: usize, field: &'static str },
}

impl fmt::Display for FeatureImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureImportError::Io(err) => write!(f, "failed to read feature frame: {}", err),
            FeatureImportError::Csv(err) => write!(f, "invalid feature CSV data: {}", err),
            FeatureImportError::InvalidDate { line, value } => {
                write!(f, "line {}: unrecognised date `{}`", line, value)
            }
            FeatureImportError::MissingKey { line, field } => {
                write!(f, "line {}: `{}` must not be blank", line, field)
            }
        }
    }
}

impl std::error::Error for FeatureImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureImportError::Io(err) => Some(err),
            FeatureImportError::Csv(err) => Some(err),
            FeatureImportError::InvalidDate { .. } | FeatureImportError::MissingKey { .. } => None,
        }
    }
}

impl From<std::io::Error> for FeatureImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FeatureImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct FeatureFrameImporter;

impl FeatureFrameImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureRecord>, FeatureImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let records = Self::from_reader(file)?;
        info!(path = %path.display(), rows = records.len(), "feature frame loaded");
        Ok(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<FeatureRecord>, FeatureImportError> {
        parser::parse_records(reader)
    }
}
