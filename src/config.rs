//! Configuration and CLI argument handling

use crate::time::DurationSpec;
use clap::Parser;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "countdown")]
#[command(about = "A terminal countdown timer with a ring per time unit")]
#[command(version)]
pub struct Config {
    /// Days to prefill in the form
    #[arg(short, long, default_value_t = 0)]
    pub days: u64,

    /// Hours to prefill in the form
    #[arg(short = 'H', long, default_value_t = 0)]
    pub hours: u64,

    /// Minutes to prefill in the form
    #[arg(short, long, default_value_t = 0)]
    pub minutes: u64,

    /// Seconds to prefill in the form
    #[arg(short, long, default_value_t = 10)]
    pub seconds: u64,

    /// Milliseconds between display refreshes
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(16..=5000))]
    pub interval_ms: u64,

    /// Start counting down immediately instead of showing the form
    #[arg(long)]
    pub start: bool,

    /// Width of each ring gauge in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(4..=80))]
    pub width: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 10,
            interval_ms: 200,
            start: false,
            width: 20,
            verbose: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The prefilled duration
    pub fn duration_spec(&self) -> DurationSpec {
        DurationSpec::new(self.days, self.hours, self.minutes, self.seconds)
    }

    /// Tick cadence
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Makes `config` the process-wide configuration.
///
/// Only the first call wins; later calls return the rejected config.
pub fn install(config: Config) -> Result<(), Config> {
    CONFIG.set(config)
}

/// The installed configuration, or the defaults if none was installed.
pub fn current() -> Config {
    CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_clap_defaults() {
        let parsed = Config::try_parse_from(["countdown"]).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_parse_duration_flags() {
        let args = [
            "countdown", "-d", "1", "-H", "2", "-m", "3", "-s", "4", "--start",
        ];
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.duration_spec(), DurationSpec::new(1, 2, 3, 4));
        assert!(config.start);
    }

    #[test]
    fn test_interval_range_enforced() {
        assert!(Config::try_parse_from(["countdown", "--interval-ms", "5"]).is_err());
        let config = Config::try_parse_from(["countdown", "--interval-ms", "1000"]).unwrap();
        assert_eq!(config.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_negative_components_rejected() {
        assert!(Config::try_parse_from(["countdown", "--seconds", "-5"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut config = Config::default();
        assert_eq!(config.log_level(), "info");
        config.verbose = true;
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_current_falls_back_to_default() {
        // Nothing in the test binary installs a config
        assert_eq!(current(), Config::default());
    }
}
