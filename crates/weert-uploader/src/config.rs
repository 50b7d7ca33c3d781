//! Uploader configuration: built-in defaults merged under a TOML user file.
//!
//! Every key has a default, so a user file only lists overrides. The default
//! filter table covers the eight standard observation types with their WeeRT
//! field names; a user-supplied `[filters]` table replaces it wholesale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use weert_common::{Error, Result};

/// Default WeeRT server URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Default staleness cutoff, in seconds.
pub const DEFAULT_STALE_SECS: u64 = 60;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default wait between retries, in seconds.
pub const DEFAULT_RETRY_WAIT_SECS: u64 = 5;

/// Authentication scheme for the ingestion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Pre-shared username/password in a Basic header.
    #[default]
    Basic,
    /// Pre-shared token in a Bearer header.
    Bearer,
}

/// Complete uploader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploaderConfig {
    /// Base URL of the WeeRT server.
    pub server_url: String,

    /// Measurement (time-series category) the packets are posted under.
    pub measurement: String,

    /// Platform tag.
    pub platform: String,

    /// Stream tag.
    pub stream: String,

    pub auth_mode: AuthMode,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,

    /// How many packets may accumulate before the oldest are trimmed.
    /// `None` allows any number.
    pub max_backlog: Option<usize>,

    /// How old a packet can be and still be worth posting.
    /// `None` disables the staleness check.
    pub stale_secs: Option<u64>,

    pub timeout_secs: u64,
    pub max_tries: u32,
    pub retry_wait_secs: u64,
    pub log_success: bool,
    pub log_failure: bool,

    /// Output-field name -> filter expression evaluated against the packet.
    pub filters: BTreeMap<String, String>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            measurement: "wxpackets".to_string(),
            platform: "default_platform".to_string(),
            stream: "default_stream".to_string(),
            auth_mode: AuthMode::Basic,
            username: None,
            password: None,
            token: None,
            max_backlog: None,
            stale_secs: Some(DEFAULT_STALE_SECS),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tries: 1,
            retry_wait_secs: DEFAULT_RETRY_WAIT_SECS,
            log_success: true,
            log_failure: true,
            filters: default_filters(),
        }
    }
}

/// The standard observation types, keyed by their WeeRT field names.
pub fn default_filters() -> BTreeMap<String, String> {
    [
        ("outside_temperature", "outTemp"),
        ("dewpoint_temperature", "dewpoint"),
        ("inside_temperature", "inTemp"),
        ("outside_humidity", "outHumidity"),
        ("barometer_pressure", "barometer"),
        ("wind_speed", "windSpeed"),
        ("wind_direction", "windDir"),
        ("day_rain", "dayRain"),
    ]
    .into_iter()
    .map(|(name, expr)| (name.to_string(), expr.to_string()))
    .collect()
}

impl UploaderConfig {
    /// Load a config file, merging its keys over the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic validation beyond what serde enforces.
    pub fn validate(&self) -> Result<()> {
        match self.auth_mode {
            AuthMode::Basic => {
                if self.username.is_none() || self.password.is_none() {
                    return Err(Error::Config(
                        "basic auth requires username and password".to_string(),
                    ));
                }
            }
            AuthMode::Bearer => {
                if self.token.is_none() {
                    return Err(Error::Config("bearer auth requires token".to_string()));
                }
            }
        }
        if self.measurement.is_empty() {
            return Err(Error::Config("measurement must not be empty".to_string()));
        }
        if self.max_tries == 0 {
            return Err(Error::Config("max_tries must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The URL packet bodies are posted to.
    pub fn packets_url(&self) -> String {
        format!(
            "{}/api/v1/measurements/{}/packets",
            self.server_url.trim_end_matches('/'),
            self.measurement
        )
    }
}
