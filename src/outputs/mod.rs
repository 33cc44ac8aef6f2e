//! Output generation: canonical entry lines and the append-only log they go to.
//!
//! # Submodules
//!
//! - [`entry`]: builds the single-line record for one observation
//! - [`log`]: deduplication store and the append-only log file writer
//!
//! # Log File Layout
//!
//! ```text
//! // Überwachung gestartet: 2025-11-03 08:15:00
//! // Schlagwörter: Einbruch, Diebstahl
//! {"coords": [8.6, 50.1], "date": "2024-05-03"}, // Bad Homburg, Einbruch
//! //{"coords": [], "date": "2024-05-04"} // Wetzlar, Diebstahl
//! //{"coords": [], "date": "2024-05-04"} // Kein Ort gefunden, Einbruch
//! ```
//!
//! Lines starting with `//` are comments to any consumer of the file; only
//! complete records stay active.

pub mod entry;
pub mod log;
