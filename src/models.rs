//! Data models shared by the scraper, the extractors and the entry log.
//!
//! - [`NewsArticle`]: one article block cut out of the index page
//! - [`CoordinatePair`] and [`Resolution`]: the outcome of a coordinate lookup
//! - [`Entry`] and [`EntryStatus`]: a canonical log line and what it says

use itertools::Itertools;
use std::fmt;

/// A raw press release as scraped from the index page.
///
/// Two renditions of the text are kept because the extractors were tuned
/// against different ones: location heuristics read the flattened text, the
/// date pattern reads the raw concatenation.
#[derive(Debug, Clone)]
pub struct NewsArticle {
    /// The page the article block was found on.
    pub source: String,
    /// Text nodes joined, every whitespace run collapsed to one space.
    pub content: String,
    /// Text nodes concatenated as they appear in the markup.
    pub raw: String,
}

impl NewsArticle {
    /// Build an article from a single block of text.
    ///
    /// `raw` keeps the text as given; `content` has whitespace runs collapsed.
    pub fn from_text(source: impl Into<String>, text: impl Into<String>) -> Self {
        let raw = text.into();
        NewsArticle {
            source: source.into(),
            content: raw.split_whitespace().join(" "),
            raw,
        }
    }

    /// Lowercased flattened text, used for keyword matching.
    pub fn lowercase(&self) -> String {
        self.content.to_lowercase()
    }
}

/// A coordinate pair in output order (latitude, longitude).
///
/// The coordinate table stores its pairs the other way round; the resolver
/// swaps them before building this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", Coord(self.lat), Coord(self.lon))
    }
}

/// Renders whole numbers with a trailing `.0` so `8.0` never collapses to `8`.
struct Coord(f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A successful coordinate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The location token that matched a table key.
    pub token: String,
    pub coords: CoordinatePair,
}

/// Which of the three entry shapes a line was built as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    LocationNotRecognized,
    CoordinatesFound { city: String },
    CoordinatesMissing,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::LocationNotRecognized => f.write_str("location not recognized"),
            EntryStatus::CoordinatesFound { city } => {
                write!(f, "coordinates found for city '{}'", city)
            }
            EntryStatus::CoordinatesMissing => f.write_str("coordinates missing"),
        }
    }
}

/// One canonical log line together with the observation it encodes.
///
/// Two observations are the same fact exactly when their `line`s are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub line: String,
    pub status: EntryStatus,
    pub location: Option<String>,
    pub keyword: String,
    pub date: String,
}

impl Entry {
    /// Whether the line is written commented out (incomplete record).
    pub fn is_commented(&self) -> bool {
        self.line.starts_with("//")
    }
}
