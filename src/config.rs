//! Process-level configuration: the provider credential and runtime settings.
//!
//! Both are read once at startup and passed down explicitly.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::backend::groq::DEFAULT_BASE_URL;
use crate::error::{AssistantError, Result};

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const ADDR_VAR: &str = "PRODUCT_ASSISTANT_ADDR";
pub const TEMPERATURE_VAR: &str = "PRODUCT_ASSISTANT_TEMPERATURE";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Variables already set are left alone.
///
/// Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable .env file");
            None
        }
    }
}

/// The provider API key, read once at startup.
///
/// A missing key is not an error here; calls made without it are rejected by
/// the provider and reported at invocation time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Load `.env`, then read the key from the environment.
    pub fn load() -> Self {
        load_dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credentials = Self::new(lookup(API_KEY_VAR));
        if credentials.api_key.is_some() {
            info!("{} found", API_KEY_VAR);
        } else {
            warn!(
                "{} is not set; provider calls will fail with an authentication error",
                API_KEY_VAR
            );
        }
        credentials
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Runtime settings for the web app and the provider client.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from a variable lookup, falling back to defaults for unset values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Settings::default();

        let addr = match lookup(ADDR_VAR) {
            Some(raw) => raw.trim().parse::<SocketAddr>().map_err(|e| {
                AssistantError::ConfigError(format!("{ADDR_VAR}={raw:?} is not a socket address: {e}"))
            })?,
            None => defaults.addr,
        };

        let base_url = match lookup(BASE_URL_VAR) {
            Some(raw) => {
                let raw = raw.trim().trim_end_matches('/').to_string();
                if !(raw.starts_with("http://") || raw.starts_with("https://")) {
                    return Err(AssistantError::ConfigError(format!(
                        "{BASE_URL_VAR}={raw:?} must start with http:// or https://"
                    )));
                }
                raw
            }
            None => defaults.base_url,
        };

        let temperature = match lookup(TEMPERATURE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or_else(|| {
                    AssistantError::ConfigError(format!(
                        "{TEMPERATURE_VAR}={raw:?} must be a number between 0 and 2"
                    ))
                })?,
            None => defaults.temperature,
        };

        debug!(%addr, base_url = %base_url, temperature, "Resolved settings");
        Ok(Settings {
            addr,
            base_url,
            temperature,
        })
    }
}
