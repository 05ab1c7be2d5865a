//! Client and host configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read the environment at runtime, so backend URLs
//! and timing knobs are baked in at compile time via `option_env!`. The host
//! binary reads its bind address from the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::LazyLock;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;
pub const DEFAULT_NOTICE_TTL_MS: u32 = 4_000;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

static CLIENT_CONFIG: LazyLock<ClientConfig> = LazyLock::new(ClientConfig::compiled);

/// Process-wide client configuration.
pub fn client() -> &'static ClientConfig {
    &CLIENT_CONFIG
}

/// Settings compiled into the browser bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the events API (rooms, messages, submissions).
    pub events_base_url: String,
    /// Base URL of the auth API (login, profile, logout).
    pub auth_base_url: String,
    pub request_timeout_ms: u32,
    pub search_debounce_ms: u32,
    pub notice_ttl_ms: u32,
}

impl ClientConfig {
    /// Configuration baked in at build time.
    ///
    /// - `PORTAL_API_URL`: events API base, default `http://localhost:5000`
    /// - `PORTAL_AUTH_URL`: auth API base, defaults to the events base
    /// - `PORTAL_REQUEST_TIMEOUT_MS`: default 15000
    /// - `PORTAL_SEARCH_DEBOUNCE_MS`: default 300
    /// - `PORTAL_NOTICE_TTL_MS`: default 4000
    #[must_use]
    pub fn compiled() -> Self {
        Self::from_values(
            option_env!("PORTAL_API_URL"),
            option_env!("PORTAL_AUTH_URL"),
            option_env!("PORTAL_REQUEST_TIMEOUT_MS"),
            option_env!("PORTAL_SEARCH_DEBOUNCE_MS"),
            option_env!("PORTAL_NOTICE_TTL_MS"),
        )
    }

    #[must_use]
    pub fn from_values(
        api_url: Option<&str>,
        auth_url: Option<&str>,
        timeout_ms: Option<&str>,
        debounce_ms: Option<&str>,
        notice_ttl_ms: Option<&str>,
    ) -> Self {
        let events_base_url = normalize_base_url(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let auth_base_url = normalize_base_url(auth_url).unwrap_or_else(|| events_base_url.clone());
        Self {
            events_base_url,
            auth_base_url,
            request_timeout_ms: parse_u32(timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS),
            search_debounce_ms: parse_u32(debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS),
            notice_ttl_ms: parse_u32(notice_ttl_ms, DEFAULT_NOTICE_TTL_MS),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None, None)
    }
}

/// Settings for the SSR host binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `BIND_ADDR` and `PORT` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(std::env::var("BIND_ADDR").ok().as_deref(), std::env::var("PORT").ok().as_deref())
    }

    #[must_use]
    pub fn from_values(bind_addr: Option<&str>, port: Option<&str>) -> Self {
        let bind_addr = bind_addr
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR)
            .to_owned();
        let port = port.and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT);
        Self { bind_addr, port }
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn normalize_base_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn parse_u32(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(default)
}
