use crate::source::{DEFAULT_COMPANIES_URL, DEFAULT_HISTORY_URL};
use crate::table::Column;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

//complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    //api endpoints
    pub companies_url: String,
    //must contain a {symbol} placeholder
    pub history_url: String,

    //cache settings
    pub cache_dir: PathBuf,
    pub cache_ttl_secs: u64,

    //network
    pub request_timeout_ms: u64,

    //table
    pub default_sort: Column,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            companies_url: DEFAULT_COMPANIES_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
            cache_dir: PathBuf::from(".tickerboard-cache"),
            cache_ttl_secs: 24 * 60 * 60,
            request_timeout_ms: 10_000,
            default_sort: Column::Date,
        }
    }
}

impl DashboardConfig {
    //load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.history_url.contains("{symbol}") {
            anyhow::bail!(
                "history_url must contain a {{symbol}} placeholder: {}",
                self.history_url
            );
        }
        if self.request_timeout_ms == 0 {
            anyhow::bail!("request_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
