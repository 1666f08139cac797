//! Client configuration baked in from build-time environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bundle is served as static files, so there is no runtime environment to
//! read. Values are captured with `option_env!` when the WASM is compiled and
//! fall back to local-development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_PROFILE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub api_base_url: String,
    /// Path prefix of the REST API (e.g. `/api/v1`); empty when unversioned.
    pub api_prefix: String,
    /// Upper bound for every profile verification (start-up and OAuth callback).
    pub profile_timeout: Duration,
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `API_BASE_URL`: default `http://localhost:8080`
    /// - `API_PREFIX`: default `/api/v1`
    /// - `PROFILE_TIMEOUT_MS`: default 10000
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("API_PREFIX"),
            option_env!("PROFILE_TIMEOUT_MS"),
        )
    }

    pub fn from_values(base_url: Option<&str>, prefix: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let api_prefix = normalize_prefix(prefix.unwrap_or(DEFAULT_API_PREFIX));
        let profile_timeout = Duration::from_millis(parse_timeout_ms(timeout_ms, DEFAULT_PROFILE_TIMEOUT_MS));

        Self { api_base_url, api_prefix, profile_timeout }
    }

    /// Origin plus prefix; every gateway path is appended to this.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.api_base_url, self.api_prefix)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_timeout_ms(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default)
}
