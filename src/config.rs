//! Runtime configuration.
//!
//! Everything has a built-in default, so the watcher runs without a config
//! file. A YAML file passed with `--config` overrides individual keys:
//!
//! ```yaml
//! url: https://www.presseportal.de/blaulicht/d/polizei
//! keywords: [Einbruch, Diebstahl]
//! exclude_words: [Schule, Markt]
//! output_file: einbrueche_diebstaehle.txt
//! coordinates_file: koordinaten.json
//! poll_interval_secs: 60
//! timeout_secs: 15
//! ```
//!
//! `exclude_words` is added to the built-in exclusion list, it does not
//! replace it.

use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_URL: &str = "https://www.presseportal.de/blaulicht/d/polizei";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";
pub const DEFAULT_OUTPUT_FILE: &str = "einbrueche_diebstaehle.txt";
pub const DEFAULT_COORDINATES_FILE: &str = "koordinaten.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Index page that is polled.
    pub url: String,
    pub user_agent: String,
    /// Trigger words, matched case-insensitively. Order decides which one is logged.
    pub keywords: Vec<String>,
    /// Extra words never accepted as a location.
    pub exclude_words: Vec<String>,
    pub output_file: PathBuf,
    pub coordinates_file: PathBuf,
    pub poll_interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            keywords: vec!["Einbruch".to_string(), "Diebstahl".to_string()],
            exclude_words: Vec::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            coordinates_file: PathBuf::from(DEFAULT_COORDINATES_FILE),
            poll_interval_secs: 60,
            timeout_secs: 15,
        }
    }
}

impl WatchConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let config: WatchConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Load from `path`, or return the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| format!("reading config {}: {}", path, e))?;
                let config = Self::from_yaml(&yaml)?;
                info!(path, "Loaded configuration");
                Ok(config)
            }
            None => Self::default().validated(),
        }
    }

    /// Normalize keywords and check the values that would otherwise fail late.
    pub fn validated(mut self) -> Result<Self, Box<dyn Error>> {
        Url::parse(&self.url).map_err(|e| format!("invalid url {:?}: {}", self.url, e))?;

        self.keywords = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unique()
            .collect();
        if self.keywords.is_empty() {
            return Err("at least one keyword is required".into());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".into());
        }
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
