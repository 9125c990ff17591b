use crate::error::{LineupError, LineupResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://api.lineup-builder.co.uk/api/25";

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the player search service
    #[arg(long, env = "LINEUP_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Quiet period before a typed query is sent
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Queries shorter than this never reach the network
    #[arg(long, default_value_t = 3)]
    pub min_query_len: usize,

    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            debounce_ms: 300,
            min_query_len: 3,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LineupResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LineupError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Copies onto `self` every value the user set explicitly (flag or env),
    /// leaving file-provided values for everything left at its default.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches!(
                    matches.value_source(stringify!($field)),
                    Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
                ) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(search_url);
        update_if_present!(debounce_ms);
        update_if_present!(min_query_len);
        update_if_present!(request_timeout_secs);
    }

    pub fn validate(&self) -> LineupResult<()> {
        if self.search_url.trim().is_empty() {
            return Err(LineupError::Config("search_url must not be empty".into()));
        }
        if self.min_query_len == 0 {
            return Err(LineupError::Config("min_query_len must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(LineupError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
