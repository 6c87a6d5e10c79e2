//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::gateway::{DEFAULT_BASE_URL, GatewayConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the statistics API (`JOURNEY_API_URL`).
    pub api_url: String,

    /// Address to listen on (`JOURNEY_BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Fixture directory; when set, the mock gateway replaces the API
    /// (`JOURNEY_MOCK_DATA`).
    pub mock_data_dir: Option<PathBuf>,

    /// Directory served under `/static` (`JOURNEY_STATIC_DIR`).
    pub static_dir: PathBuf,

    /// Statistics API request timeout in seconds (`JOURNEY_API_TIMEOUT_SECS`).
    pub api_timeout_secs: u64,

    /// Response cache TTL in seconds (`JOURNEY_CACHE_TTL_SECS`).
    pub cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mock_data_dir: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Unset and empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = get("JOURNEY_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError {
                var: "JOURNEY_API_URL",
                value: api_url,
                reason: "expected an http(s) URL",
            });
        }

        let bind_value = get("JOURNEY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value.trim().parse().map_err(|_| ConfigError {
            var: "JOURNEY_BIND_ADDR",
            value: bind_value.clone(),
            reason: "expected host:port",
        })?;

        Ok(Self {
            api_url,
            bind_addr,
            mock_data_dir: get("JOURNEY_MOCK_DATA").map(PathBuf::from),
            static_dir: get("JOURNEY_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            api_timeout_secs: parse_secs(
                "JOURNEY_API_TIMEOUT_SECS",
                get("JOURNEY_API_TIMEOUT_SECS"),
                DEFAULT_API_TIMEOUT_SECS,
            )?,
            cache_ttl_secs: parse_secs(
                "JOURNEY_CACHE_TTL_SECS",
                get("JOURNEY_CACHE_TTL_SECS"),
                DEFAULT_CACHE_TTL_SECS,
            )?,
        })
    }

    /// Use fixture data instead of the statistics API.
    pub fn with_mock_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_data_dir = Some(dir.into());
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Settings for the HTTP gateway.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(&self.api_url).with_timeout(self.api_timeout_secs)
    }

    /// Settings for the response cache.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            ..CacheConfig::default()
        }
    }
}

fn parse_secs(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            var,
            value,
            reason: "must be at least 1",
        }),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError {
            var,
            value,
            reason: "expected a whole number of seconds",
        }),
    }
}
