//! Canonical entry lines.
//!
//! One observation becomes exactly one line, in one of three shapes:
//!
//! | Location | Coordinates | Line |
//! |----------|-------------|------|
//! | none | - | `//{"coords": [], "date": "D"} // Kein Ort gefunden, K` |
//! | found | found | `{"coords": [LAT, LON], "date": "D"}, // L, K` |
//! | found | missing | `//{"coords": [], "date": "D"} // L, K` |
//!
//! Only the complete shape is left active, so the file can be fed to a map
//! tool while incomplete observations stay visible for manual follow-up.
//! The line text doubles as the deduplication key, so its format must not
//! drift between versions.

use crate::models::{Entry, EntryStatus, Resolution};

/// Comment written in place of a location when none was extracted.
pub const NO_LOCATION_NOTE: &str = "Kein Ort gefunden";

/// Build the canonical entry for one observation.
///
/// `resolution` is only consulted when a location is present.
pub fn format_entry(
    location: Option<&str>,
    keyword: &str,
    date: &str,
    resolution: Option<&Resolution>,
) -> Entry {
    let (line, status) = match (location, resolution) {
        (None, _) => (
            format!(
                r#"//{{"coords": [], "date": "{}"}} // {}, {}"#,
                date, NO_LOCATION_NOTE, keyword
            ),
            EntryStatus::LocationNotRecognized,
        ),
        (Some(location), Some(resolution)) => (
            format!(
                r#"{{"coords": {}, "date": "{}"}}, // {}, {}"#,
                resolution.coords, date, location, keyword
            ),
            EntryStatus::CoordinatesFound {
                city: resolution.token.clone(),
            },
        ),
        (Some(location), None) => (
            format!(
                r#"//{{"coords": [], "date": "{}"}} // {}, {}"#,
                date, location, keyword
            ),
            EntryStatus::CoordinatesMissing,
        ),
    };

    Entry {
        line,
        status,
        location: location.map(str::to_string),
        keyword: keyword.to_string(),
        date: date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoordinatePair;

    fn homburg() -> Resolution {
        Resolution {
            token: "Homburg".to_string(),
            coords: CoordinatePair { lat: 8.6, lon: 50.1 },
        }
    }

    #[test]
    fn test_active_entry_with_coordinates() {
        let entry = format_entry(Some("Bad Homburg"), "Einbruch", "2024-05-03", Some(&homburg()));
        assert_eq!(
            entry.line,
            r#"{"coords": [8.6, 50.1], "date": "2024-05-03"}, // Bad Homburg, Einbruch"#
        );
        assert_eq!(
            entry.status,
            EntryStatus::CoordinatesFound {
                city: "Homburg".to_string()
            }
        );
        assert!(!entry.is_commented());
    }

    #[test]
    fn test_commented_entry_without_coordinates() {
        let entry = format_entry(Some("Wetzlar"), "Diebstahl", "2024-05-04", None);
        assert_eq!(
            entry.line,
            r#"//{"coords": [], "date": "2024-05-04"} // Wetzlar, Diebstahl"#
        );
        assert_eq!(entry.status, EntryStatus::CoordinatesMissing);
        assert!(entry.is_commented());
    }

    #[test]
    fn test_commented_entry_without_location() {
        let entry = format_entry(None, "Einbruch", "2024-05-04", Some(&homburg()));
        assert_eq!(
            entry.line,
            r#"//{"coords": [], "date": "2024-05-04"} // Kein Ort gefunden, Einbruch"#
        );
        assert_eq!(entry.status, EntryStatus::LocationNotRecognized);
        assert_eq!(entry.location, None);
    }

    #[test]
    fn test_same_observation_same_line() {
        let a = format_entry(Some("Kassel"), "Einbruch", "2024-01-01", None);
        let b = format_entry(Some("Kassel"), "Einbruch", "2024-01-01", None);
        let c = format_entry(Some("Kassel"), "Einbruch", "2024-01-02", None);
        assert_eq!(a.line, b.line);
        assert_ne!(a.line, c.line);
    }
}
