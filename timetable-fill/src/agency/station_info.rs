//! Agency facts that GTFS does not carry.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::error::AgencyError;

/// Per-agency station and train facts, loaded from a JSON file.
///
/// Every list is optional; a missing list means "none".
///
/// ```json
/// {
///   "baggage_stations": ["NYP", "WAS"],
///   "baggage_trains": ["19", "20"],
///   "major_stations": ["NYP"],
///   "sleeper_trains": ["19"],
///   "connecting_trains": []
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationInfo {
    /// Station codes with checked baggage service.
    pub baggage_stations: HashSet<String>,
    /// Train numbers that carry checked baggage.
    pub baggage_trains: HashSet<String>,
    /// Station codes shown emphasized.
    pub major_stations: HashSet<String>,
    pub sleeper_trains: HashSet<String>,
    /// Train numbers run by a partner operator.
    pub connecting_trains: HashSet<String>,
}

impl StationInfo {
    /// Read station info from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AgencyError> {
        let text = std::fs::read_to_string(path).map_err(|source| AgencyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, AgencyError> {
        serde_json::from_str(text).map_err(|e| AgencyError::Json {
            message: e.to_string(),
        })
    }
}
