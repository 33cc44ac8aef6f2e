//! Heuristic extractors that turn free press-release text into structured fields.
//!
//! # Submodules
//!
//! - [`date`]: finds the first `D.M.YYYY` or `D. Monat YYYY` date and normalizes it
//! - [`location`]: guesses a place name with an ordered list of heuristics
//!
//! Both extractors are pure: they take `&str` and return `Option`, so the
//! pipeline decides what a missing field means.

pub mod date;
pub mod location;

pub use date::extract_date;
pub use location::LocationExtractor;
