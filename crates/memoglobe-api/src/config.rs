//! Server settings.
//!
//! Read once per process from `MEMOGLOBE_`-prefixed environment variables,
//! after `main` has let `dotenvy` fill in anything from a `.env` file.
//!
//! ```bash
//! MEMOGLOBE_APP_NAME="MemoGlobe API"
//! MEMOGLOBE_ENVIRONMENT=production
//! MEMOGLOBE_API_PREFIX=/v1
//! MEMOGLOBE_CORS_ORIGINS='["https://memoglobe.app","http://localhost:3000"]'
//! MEMOGLOBE_HOST=0.0.0.0
//! MEMOGLOBE_PORT=8000
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use axum::http::HeaderValue;
use memoglobe_core::{defaults, Error, Result};

const ENV_PREFIX: &str = "MEMOGLOBE_";
const WILDCARD_ORIGIN: &str = "*";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub environment: String,
    /// Normalised: empty, or a leading `/` and no trailing `/`.
    pub api_prefix: String,
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: defaults::APP_NAME.to_string(),
            environment: defaults::ENVIRONMENT.to_string(),
            api_prefix: defaults::API_PREFIX.to_string(),
            cors_origins: vec![defaults::CORS_ORIGIN.to_string()],
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

impl Settings {
    /// Load from the process environment. Variable names are matched without
    /// regard to case.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars()
            .map(|(key, value)| (key.to_ascii_uppercase(), value))
            .collect();
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build settings from any key lookup. Keys are the full upper-case
    /// variable names, e.g. `MEMOGLOBE_PORT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |field: &str| lookup(&format!("{ENV_PREFIX}{}", field.to_ascii_uppercase()));
        let base = Self::default();

        let port = match get("port") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("{ENV_PREFIX}PORT '{raw}': {e}")))?,
            None => base.port,
        };

        let cors_origins = match get("cors_origins") {
            Some(raw) => parse_cors_origins(&raw)?,
            None => base.cors_origins,
        };

        Ok(Self {
            app_name: get("app_name").unwrap_or(base.app_name),
            environment: get("environment").unwrap_or(base.environment),
            api_prefix: normalize_prefix(&get("api_prefix").unwrap_or(base.api_prefix)),
            cors_origins,
            host: get("host").unwrap_or(base.host),
            port,
        })
    }

    /// CORS origins as header values. Entries that are not valid header
    /// values, and the `*` wildcard, are skipped with a warning. Credentialed
    /// CORS cannot use a wildcard origin.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter(|origin| {
                let wildcard = origin.trim() == WILDCARD_ORIGIN;
                if wildcard {
                    tracing::warn!("Ignoring wildcard CORS origin; list origins explicitly");
                }
                !wildcard
            })
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Process-wide settings, loaded on first use.
pub fn settings() -> Result<&'static Settings> {
    if let Some(s) = SETTINGS.get() {
        return Ok(s);
    }
    let loaded = Settings::from_env()?;
    Ok(SETTINGS.get_or_init(|| loaded))
}

/// Accepts a JSON array of strings or a comma-separated list. A blank value
/// falls back to the default origin.
/// The wildcard is rejected since credentials are allowed.
fn parse_cors_origins(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(vec![defaults::CORS_ORIGIN.to_string()]);
    }
    let origins: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| Error::Config(format!("{ENV_PREFIX}CORS_ORIGINS: {e}")))?
    } else {
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };
    if origins.iter().any(|o| o.trim() == WILDCARD_ORIGIN) {
        return Err(Error::Config(format!(
            "{ENV_PREFIX}CORS_ORIGINS: wildcard origin is not allowed with credentials"
        )));
    }
    Ok(origins)
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
