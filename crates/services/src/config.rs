use std::env;
use std::time::Duration;

use url::Url;

use study_core::Clock;
use study_core::model::SessionKey;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_DB_URL: &str = "sqlite://study.sqlite3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// How the session snapshot key is chosen at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionPolicy {
    /// A new key every launch, so earlier sessions are not restored.
    PerLaunch,
    /// A fixed key that is restored on the next launch.
    Named(String),
}

impl SessionPolicy {
    #[must_use]
    pub fn session_key(&self, clock: &Clock) -> SessionKey {
        match self {
            SessionPolicy::PerLaunch => SessionKey::per_launch(clock),
            SessionPolicy::Named(name) => SessionKey::named(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub db_url: String,
    pub session: SessionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            db_url: DEFAULT_DB_URL.to_string(),
            session: SessionPolicy::PerLaunch,
        }
    }
}

impl AppConfig {
    /// Read `STUDY_API_URL`, `STUDY_API_TIMEOUT_SECS`, `STUDY_DB_URL` and `STUDY_SESSION`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like `from_env`, with the variable source injected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup("STUDY_API_URL") {
            config.set_api_base_url(&raw)?;
        }
        if let Some(raw) = lookup("STUDY_API_TIMEOUT_SECS") {
            config.set_timeout_secs(&raw)?;
        }
        if let Some(raw) = lookup("STUDY_DB_URL").filter(|raw| !raw.trim().is_empty()) {
            config.db_url = raw;
        }
        if let Some(raw) = lookup("STUDY_SESSION") {
            config.set_session_name(&raw)?;
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` unless `raw` is an absolute http(s) URL.
    pub fn set_api_base_url(&mut self, raw: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidApiUrl {
            raw: raw.to_string(),
        };
        let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        self.api_base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive integer.
    pub fn set_timeout_secs(&mut self, raw: &str) -> Result<(), ConfigError> {
        let secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidTimeout {
                raw: raw.to_string(),
            })?;
        self.request_timeout = Duration::from_secs(secs);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptySessionName` for blank names.
    pub fn set_session_name(&mut self, raw: &str) -> Result<(), ConfigError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptySessionName);
        }
        self.session = SessionPolicy::Named(name.to_string());
        Ok(())
    }
}
