//! Leap-second dataset lookups
//!
//! The dataset is a JSON array of `{"date": "..."}` objects. Dates are opaque
//! strings compared by exact equality; callers must format queries the same
//! way the dataset does (the bundled file uses `1972-06-30T23:59:60Z`).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Conventional location of the dataset relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/leapdata.json";

/// Dataset compiled into the binary, used when no file is available
const BUILTIN_DATA: &str = include_str!("../data/leapdata.json");

/// One defined leap-second insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapSecondEntry {
    pub date: String,
}

/// Read-only, ordered set of leap-second entries
#[derive(Debug, Clone, Default)]
pub struct LeapSecondRegistry {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondRegistry {
    /// Load a dataset file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let entries: Vec<LeapSecondEntry> = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            entries = entries.len(),
            "loaded leap-second dataset"
        );
        Ok(Self { entries })
    }

    /// Parse a dataset from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// The dataset bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATA)
    }

    /// Load `path` if given; otherwise [`DEFAULT_DATA_PATH`] if it exists,
    /// falling back to the bundled dataset
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_DATA_PATH).is_file() => Self::load(DEFAULT_DATA_PATH),
            None => {
                tracing::debug!("{} not found, using bundled dataset", DEFAULT_DATA_PATH);
                Self::builtin()
            }
        }
    }

    /// Exact string match against the dataset; no normalization is applied
    pub fn contains(&self, date: &str) -> bool {
        self.entries.iter().any(|e| e.date == date)
    }

    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
