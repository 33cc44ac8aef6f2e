//! Place-name guessing from unstructured press-release text.
//!
//! Heuristics are tried in order and the first one that produces an acceptable
//! candidate wins:
//!
//! 1. **Agency dateline**: `Bad Homburg (ots)` at the head of a release.
//! 2. **Prepositional phrase**: `in Kassel`, `bei Fulda`, `aus Marburg`, ...
//!    tried preposition by preposition, matches in article order.
//!
//! Every candidate is checked against an exclusion set of generic nouns,
//! weekdays and known false positives.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Words that are never accepted as a location.
pub const DEFAULT_EXCLUDE_WORDS: &[&str] = &[
    "Container",
    "Fahrschule",
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
    "Polizei",
    "Ermittler",
    "Täter",
    "Zeugen",
    "Hinweise",
    "Opfer",
    "Einbrecher",
    "Diebe",
    "Fahrzeug",
    "Wohnung",
    "Haus",
    "Geschäft",
    "Firma",
    "Unternehmen",
    "Ladendiebstahl",
    "PKW",
    "LKW",
    "Auto",
    "Werkstatt",
    "Garage",
    "Idstein",
    "Black",
    "Deckerstraße",
];

const WEEKDAYS: [&str; 7] = [
    "montag",
    "dienstag",
    "mittwoch",
    "donnerstag",
    "freitag",
    "samstag",
    "sonntag",
];

/// Tried in this order.
const PREPOSITIONS: [&str; 7] = ["in", "bei", "aus", "von", "im", "am", "an"];

static DATELINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-ZÄÖÜ][a-zäöüß\-]+(?:\s+[A-ZÄÖÜ][a-zäöüß\-]+)*)\s*\(ots\)")
        .expect("dateline regex")
});

static PREPOSITION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    PREPOSITIONS
        .iter()
        .map(|prep| {
            RegexBuilder::new(&format!(
                r"{}\s+([A-ZÄÖÜ][A-Za-zäöüß0-9\-.,]+(?:\s+[A-ZÄÖÜ][A-Za-zäöüß0-9\-.,]+)*)",
                prep
            ))
            .case_insensitive(true)
            .build()
            .expect("preposition regex")
        })
        .collect()
});

/// One location heuristic. Returns an already-validated candidate.
type Heuristic = fn(&LocationExtractor, &str) -> Option<String>;

const HEURISTICS: [Heuristic; 2] = [
    LocationExtractor::agency_dateline,
    LocationExtractor::prepositional,
];

/// Location extractor bound to an exclusion set.
#[derive(Debug, Clone)]
pub struct LocationExtractor {
    exclusions: HashSet<String>,
}

impl Default for LocationExtractor {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl LocationExtractor {
    /// Build an extractor excluding the defaults plus `extra` words.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exclusions: HashSet<String> =
            DEFAULT_EXCLUDE_WORDS.iter().map(|w| w.to_string()).collect();
        exclusions.extend(extra.into_iter().map(Into::into));
        LocationExtractor { exclusions }
    }

    pub fn is_excluded(&self, candidate: &str) -> bool {
        self.exclusions.contains(candidate)
    }

    /// Best-guess place name in `text`, or `None`.
    pub fn extract(&self, text: &str) -> Option<String> {
        HEURISTICS.iter().find_map(|heuristic| heuristic(self, text))
    }

    /// `City Name (ots)`. Only the first dateline in the text is considered.
    pub fn agency_dateline(&self, text: &str) -> Option<String> {
        let caps = DATELINE_PATTERN.captures(text)?;
        let candidate = caps.get(1)?.as_str().trim();
        if self.is_excluded(candidate) {
            return None;
        }
        Some(candidate.to_string())
    }

    /// `in Kassel`, `bei Fulda`, ... first acceptable candidate wins.
    pub fn prepositional(&self, text: &str) -> Option<String> {
        PREPOSITION_PATTERNS.iter().find_map(|pattern| {
            pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim_matches(|c: char| matches!(c, '.' | ',' | ';')))
                .find(|candidate| self.is_acceptable(candidate))
                .map(str::to_string)
        })
    }

    fn is_acceptable(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        candidate.chars().count() >= 3
            && !self.is_excluded(candidate)
            && !WEEKDAYS.iter().any(|day| lower.contains(day))
            && candidate.chars().any(char::is_uppercase)
    }
}
