//! The append-only entry log and its deduplication store.
//!
//! [`DedupStore`] is the in-memory set of every active line ever written.
//! [`EntryLog`] owns one store plus the path of the log file and is the only
//! writer: a line reaches the store only after it has been appended to disk,
//! so a failed write is retried the next time the same observation shows up.

use crate::models::Entry;
use chrono::Local;
use itertools::Itertools;
use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Lines starting with this marker are never loaded as entries.
pub const COMMENT_MARKER: &str = "//";

/// Set of canonical lines already present in the log.
#[derive(Debug, Default, Clone)]
pub struct DedupStore {
    lines: HashSet<String>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from log text.
    ///
    /// Every non-empty line that does not start with the comment marker is
    /// kept, trimmed of surrounding whitespace. Header lines and commented
    /// (incomplete) entries are skipped.
    pub fn from_log_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
            .map(str::to_string)
            .collect();
        DedupStore { lines }
    }

    /// Seed a store from the log at `path`. A missing file gives an empty store.
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !fs::try_exists(path).await? {
            return Ok(Self::new());
        }
        let text = fs::read_to_string(path).await?;
        Ok(Self::from_log_text(&text))
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.insert(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of offering an entry to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Written,
    Duplicate,
}

/// Append-only log file plus the store that guards it.
#[derive(Debug)]
pub struct EntryLog {
    path: PathBuf,
    store: DedupStore,
}

impl EntryLog {
    /// Open the log at `path`, creating it with a header if it is absent.
    ///
    /// An existing log is never rewritten; its entries seed the store.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>, keywords: &[String]) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref().to_path_buf();

        let store = if fs::try_exists(&path).await? {
            let store = DedupStore::load(&path).await?;
            info!(entries = store.len(), "Loaded existing log entries");
            store
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&path, header(keywords)).await?;
            info!("Created new log with header");
            DedupStore::new()
        };

        Ok(EntryLog { path, store })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &DedupStore {
        &self.store
    }

    pub fn is_duplicate(&self, line: &str) -> bool {
        self.store.contains(line)
    }

    /// Append `entry` unless its line is already known.
    ///
    /// The store is only updated after the write succeeded.
    #[instrument(level = "debug", skip_all, fields(date = %entry.date))]
    pub async fn append(&mut self, entry: &Entry) -> Result<AppendOutcome, Box<dyn Error>> {
        if self.is_duplicate(&entry.line) {
            debug!(line = %entry.line, "Entry already logged");
            return Ok(AppendOutcome::Duplicate);
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", entry.line).as_bytes()).await?;
        file.flush().await?;

        self.store.record(entry.line.clone());
        Ok(AppendOutcome::Written)
    }
}

/// Header block written once when a log is created.
pub fn header(keywords: &[String]) -> String {
    format!(
        "{marker} Überwachung gestartet: {}\n{marker} Schlagwörter: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        keywords.iter().join(", "),
        marker = COMMENT_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::entry::format_entry;

    fn keywords() -> Vec<String> {
        vec!["Einbruch".to_string(), "Diebstahl".to_string()]
    }

    #[test]
    fn test_from_log_text_skips_comments_and_blanks() {
        let text = "// Überwachung gestartet: 2025-01-01 00:00:00\n\
                    // Schlagwörter: Einbruch, Diebstahl\n\
                    {\"coords\": [8.6, 50.1], \"date\": \"2024-05-03\"}, // Bad Homburg, Einbruch\n\
                    \n\
                    //{\"coords\": [], \"date\": \"2024-05-04\"} // Wetzlar, Diebstahl\n";
        let store = DedupStore::from_log_text(text);
        assert_eq!(store.len(), 1);
        assert!(store.contains(r#"{"coords": [8.6, 50.1], "date": "2024-05-03"}, // Bad Homburg, Einbruch"#));
    }

    #[test]
    fn test_from_log_text_trims_whitespace() {
        let store = DedupStore::from_log_text("  entry line  \r\n");
        assert!(store.contains("entry line"));
    }

    #[test]
    fn test_record_and_contains() {
        let mut store = DedupStore::new();
        assert!(!store.contains("a"));
        store.record("a");
        store.record("a");
        assert!(store.contains("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_header_lists_keywords() {
        let header = header(&keywords());
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("// Überwachung gestartet: "));
        assert_eq!(lines[1], "// Schlagwörter: Einbruch, Diebstahl");
    }

    #[tokio::test]
    async fn test_open_creates_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.txt");
        let log = EntryLog::open(&path, &keywords()).await.unwrap();
        assert!(log.store().is_empty());

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.starts_with(COMMENT_MARKER)));
    }

    #[tokio::test]
    async fn test_append_twice_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut log = EntryLog::open(&path, &keywords()).await.unwrap();
        let entry = format_entry(Some("Kassel"), "Einbruch", "2024-03-12", None);

        assert_eq!(log.append(&entry).await.unwrap(), AppendOutcome::Written);
        let after_first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(log.append(&entry).await.unwrap(), AppendOutcome::Duplicate);
        let after_second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.matches(&entry.line).count(), 1);
    }

    #[tokio::test]
    async fn test_reopen_loads_active_entries_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut log = EntryLog::open(&path, &keywords()).await.unwrap();

        let active = Entry {
            line: r#"{"coords": [8.6, 50.1], "date": "2024-05-03"}, // Bad Homburg, Einbruch"#.to_string(),
            ..format_entry(Some("Bad Homburg"), "Einbruch", "2024-05-03", None)
        };
        let commented = format_entry(Some("Wetzlar"), "Diebstahl", "2024-05-04", None);
        log.append(&active).await.unwrap();
        log.append(&commented).await.unwrap();
        assert_eq!(log.store().len(), 2);

        let mut reopened = EntryLog::open(&path, &keywords()).await.unwrap();
        assert_eq!(reopened.store().len(), 1);
        assert!(reopened.is_duplicate(&active.line));
        assert_eq!(reopened.append(&active).await.unwrap(), AppendOutcome::Duplicate);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("// Überwachung gestartet: "));
        assert_eq!(text.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut log = EntryLog::open(&path, &keywords()).await.unwrap();

        // replace the log file with a directory so the append fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let entry = format_entry(Some("Kassel"), "Einbruch", "2024-03-12", None);
        assert!(log.append(&entry).await.is_err());
        assert!(!log.is_duplicate(&entry.line));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DedupStore::load(&dir.path().join("absent.txt")).await.unwrap();
        assert!(store.is_empty());
    }
}
