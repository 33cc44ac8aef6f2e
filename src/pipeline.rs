//! Per-cycle article processing.
//!
//! For every article block: keyword filter, date, location, coordinates,
//! canonical entry, deduplicated append. The pipeline owns the entry log, so
//! one process has exactly one writer.

use crate::coordinates::CoordinateTable;
use crate::extract::{LocationExtractor, extract_date};
use crate::models::NewsArticle;
use crate::outputs::entry::format_entry;
use crate::outputs::log::{AppendOutcome, EntryLog};
use crate::utils::truncate_for_log;
use tracing::{debug, error, info, instrument};

/// Counters for one processed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub seen: usize,
    pub matched: usize,
    pub undated: usize,
    pub written: usize,
    pub duplicates: usize,
    pub failed: usize,
}

pub struct Pipeline {
    keywords: Vec<String>,
    locator: LocationExtractor,
    table: CoordinateTable,
    log: EntryLog,
}

impl Pipeline {
    pub fn new(
        keywords: Vec<String>,
        locator: LocationExtractor,
        table: CoordinateTable,
        log: EntryLog,
    ) -> Self {
        Pipeline {
            keywords,
            locator,
            table,
            log,
        }
    }

    pub fn log(&self) -> &EntryLog {
        &self.log
    }

    /// First configured keyword contained in `lowercase_text`.
    pub fn matched_keyword(&self, lowercase_text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|kw| lowercase_text.contains(&kw.to_lowercase()))
            .map(String::as_str)
    }

    /// Process one fetched batch in order.
    ///
    /// A failed append is logged and counted; it does not abort the batch.
    #[instrument(level = "info", skip_all, fields(articles = articles.len()))]
    pub async fn process(&mut self, articles: &[NewsArticle]) -> CycleSummary {
        let mut summary = CycleSummary {
            seen: articles.len(),
            ..Default::default()
        };

        for article in articles {
            let lowercase = article.lowercase();
            let Some(keyword) = self.matched_keyword(&lowercase).map(str::to_string) else {
                continue;
            };
            summary.matched += 1;

            let Some(date) = extract_date(&article.raw) else {
                debug!(
                    source = %article.source,
                    preview = %truncate_for_log(&article.content, 120),
                    "No date found; dropping article"
                );
                summary.undated += 1;
                continue;
            };

            let location = self.locator.extract(&article.content);
            let resolution = self.table.resolve(location.as_deref());
            let entry = format_entry(location.as_deref(), &keyword, &date, resolution.as_ref());

            match self.log.append(&entry).await {
                Ok(AppendOutcome::Written) => {
                    summary.written += 1;
                    info!(
                        status = %entry.status,
                        commented = entry.is_commented(),
                        location = %entry.location.as_deref().unwrap_or("—"),
                        keyword = %entry.keyword,
                        date = %entry.date,
                        "Logged entry"
                    );
                }
                Ok(AppendOutcome::Duplicate) => {
                    summary.duplicates += 1;
                    info!(
                        location = %entry.location.as_deref().unwrap_or("—"),
                        keyword = %entry.keyword,
                        date = %entry.date,
                        "Duplicate (skipped)"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        error = %e,
                        path = %self.log.path().display(),
                        line = %entry.line,
                        "Failed to append entry; will retry when seen again"
                    );
                }
            }
        }

        summary
    }
}
