//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use rate_gateway::{DEFAULT_TIMEOUT, GatewayConfig};

/// Used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://currency_db.sqlite?mode=rwc";

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub gateway: GatewayConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {raw:?}: {e}"))?,
            None => 3000,
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be whole seconds, got {raw:?}: {e}")
                })?;
                if secs == 0 {
                    anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let mut gateway = GatewayConfig::new(var("FREE_CURRENCY_API_KEY")).with_timeout(timeout);
        if let Some(url) = var("FREE_CURRENCY_API_URL") {
            gateway = gateway.with_base_url(url);
        }

        Ok(Self {
            port,
            database_url,
            gateway,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.gateway.api_key, None);
        assert_eq!(config.gateway.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.gateway.base_url, rate_gateway::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("FREE_CURRENCY_API_KEY", "fca_live_abc"),
            ("FREE_CURRENCY_API_URL", "http://localhost:9000/v1/"),
            ("UPSTREAM_TIMEOUT_SECS", "2"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.gateway.api_key.as_deref(), Some("fca_live_abc"));
        assert_eq!(config.gateway.base_url, "http://localhost:9000/v1");
        assert_eq!(config.gateway.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = load(&[("FREE_CURRENCY_API_KEY", "  ")]).unwrap();
        assert_eq!(config.gateway.api_key, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
