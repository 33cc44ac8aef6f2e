//! Coordinate table and location-to-coordinate resolution.
//!
//! The table is a JSON object mapping a city name to a two-element array:
//!
//! ```json
//! { "Homburg": [50.1, 8.6], "Kassel": [51.3127, 9.4797] }
//! ```
//!
//! Pairs are stored in the order the upstream data set ships them and are
//! swapped when resolved. A missing table is not fatal; every lookup then
//! simply misses.

use crate::models::{CoordinatePair, Resolution};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

static CITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-ZÄÖÜ][a-zäöüß]+").expect("city token regex"));

/// Read-only lookup from city token to coordinates (table order).
#[derive(Debug, Default, Clone)]
pub struct CoordinateTable {
    entries: HashMap<String, [f64; 2]>,
}

impl CoordinateTable {
    /// Parse a table from JSON text.
    ///
    /// Entries that are not a pair of numbers are skipped with a warning
    /// instead of rejecting the whole table.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut entries = HashMap::with_capacity(raw.len());

        for (city, value) in raw {
            match parse_pair(&value) {
                Some(pair) => {
                    entries.insert(city, pair);
                }
                None => warn!(%city, %value, "Skipping coordinate entry that is not a pair of numbers"),
            }
        }

        Ok(CoordinateTable { entries })
    }

    /// Load the table from `path`.
    ///
    /// A missing or unreadable file yields an empty table and a warning.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Coordinate table not found; coordinates will never resolve");
                return CoordinateTable::default();
            }
        };

        match CoordinateTable::from_json(&json) {
            Ok(table) => {
                info!(cities = table.len(), "Loaded coordinate table");
                table
            }
            Err(e) => {
                warn!(error = %e, "Coordinate table is invalid; coordinates will never resolve");
                CoordinateTable::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a location string by its capitalized tokens, left to right.
    ///
    /// The first token that is a table key wins; its pair is returned swapped.
    pub fn resolve(&self, location: Option<&str>) -> Option<Resolution> {
        let location = location?;
        let resolution = CITY_TOKEN.find_iter(location).find_map(|token| {
            self.entries.get(token.as_str()).map(|&[first, second]| Resolution {
                token: token.as_str().to_string(),
                coords: CoordinatePair {
                    lat: second,
                    lon: first,
                },
            })
        });
        debug!(%location, token = ?resolution.as_ref().map(|r| &r.token), "Resolved location");
        resolution
    }
}

fn parse_pair(value: &serde_json::Value) -> Option<[f64; 2]> {
    match value.as_array()?.as_slice() {
        [a, b] => Some([a.as_f64()?, b.as_f64()?]),
        _ => None,
    }
}
