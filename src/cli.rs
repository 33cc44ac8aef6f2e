//! Command-line interface definitions for the watcher.
//!
//! Flags override the matching keys of the optional YAML config file.

use clap::Parser;

/// Poll the Presseportal police feed and log burglary and theft reports.
///
/// # Examples
///
/// ```sh
/// # Run forever with built-in defaults
/// blaulicht_watch
///
/// # One cycle with a custom config and log file
/// blaulicht_watch --config watch.yaml -o /var/lib/blaulicht/log.txt --once
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log file that entries are appended to
    #[arg(short, long, env = "BLAULICHT_OUTPUT_FILE")]
    pub output_file: Option<String>,

    /// JSON coordinate table (city -> [a, b])
    #[arg(long, env = "BLAULICHT_COORDINATES_FILE")]
    pub coordinates_file: Option<String>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["blaulicht_watch"]);
        assert_eq!(cli.config, None);
        assert!(!cli.once);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "blaulicht_watch",
            "--config",
            "watch.yaml",
            "--output-file",
            "./log.txt",
            "--coordinates-file",
            "./koordinaten.json",
            "--once",
        ]);

        assert_eq!(cli.config.as_deref(), Some("watch.yaml"));
        assert_eq!(cli.output_file.as_deref(), Some("./log.txt"));
        assert_eq!(cli.coordinates_file.as_deref(), Some("./koordinaten.json"));
        assert!(cli.once);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["blaulicht_watch", "-c", "/etc/watch.yaml", "-o", "/tmp/log.txt"]);

        assert_eq!(cli.config.as_deref(), Some("/etc/watch.yaml"));
        assert_eq!(cli.output_file.as_deref(), Some("/tmp/log.txt"));
    }
}
