//! Configuration management
//!
//! Settings live in `settings.json` in the FastHR directory:
//! ```json
//! {
//!   "apiBaseUrl": "http://localhost:8000",
//!   "requestTimeoutSecs": 30
//! }
//! ```
//! Keys this crate does not manage are kept as-is when saving.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 3600;

pub const ENV_API_URL: &str = "FASTHR_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "FASTHR_TIMEOUT_SECS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

/// Effective FastHR configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Environment variables that replaced file values
    env_overrides: Vec<&'static str>,
    // File values, written back on save
    settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            env_overrides: Vec::new(),
            settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the FastHR directory
    ///
    /// `FASTHR_API_URL` and `FASTHR_TIMEOUT_SECS` win over the file.
    pub fn load(fasthr_dir: &Path) -> Result<Self> {
        Self::load_with_env(fasthr_dir, |key| std::env::var(key).ok())
    }

    /// Load config with a custom environment lookup
    pub fn load_with_env(fasthr_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let settings_path = fasthr_dir.join(SETTINGS_FILE);

        let settings: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("{} is not valid: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let request_timeout_secs = match settings.request_timeout_secs {
            Some(secs) => validate_timeout(secs, "requestTimeoutSecs")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self {
            api_base_url: settings
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs,
            env_overrides: Vec::new(),
            settings,
        };

        if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
            config.env_overrides.push(ENV_API_URL);
        }

        if let Some(raw) = env(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            config.request_timeout_secs = parse_timeout(raw.trim())?;
            config.env_overrides.push(ENV_TIMEOUT_SECS);
        }

        Ok(config)
    }

    /// Save config to the FastHR directory
    ///
    /// Environment overrides are not written; unmanaged keys are preserved.
    pub fn save(&self, fasthr_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(fasthr_dir)?;
        let content = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(fasthr_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn env_overrides(&self) -> &[&'static str] {
        &self.env_overrides
    }

    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        validate_base_url(url)?;
        self.api_base_url = url.to_string();
        self.settings.api_base_url = Some(url.to_string());
        Ok(())
    }

    pub fn set_request_timeout_secs(&mut self, secs: u64) -> Result<()> {
        let secs = validate_timeout(secs, "Request timeout")?;
        self.request_timeout_secs = secs;
        self.settings.request_timeout_secs = Some(secs);
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs = raw.parse::<u64>().map_err(|_| {
        Error::Config(format!(
            "{} must be a whole number of seconds, got '{}'",
            ENV_TIMEOUT_SECS, raw
        ))
    })?;
    validate_timeout(secs, ENV_TIMEOUT_SECS)
}

/// Timeouts must fall within 1..=MAX_TIMEOUT_SECS wherever they come from
fn validate_timeout(secs: u64, source: &str) -> Result<u64> {
    if (1..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(Error::Config(format!(
            "{} must be between 1 and {} seconds, got {}",
            source, MAX_TIMEOUT_SECS, secs
        )))
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}
