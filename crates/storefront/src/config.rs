//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AUTOLOT_STORE_PATH` - Durable store file (default: `.autolot/store.json`)
//! - `AUTOLOT_USD_CNY_RATE` - USD to CNY display rate (default: 7.2; `off` disables
//!   converted prices)
//! - `AUTOLOT_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_STORE_PATH: &str = ".autolot/store.json";

/// Rate shipped with the storefront; never refreshed.
const DEFAULT_USD_CNY_RATE: &str = "7.2";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the durable key-value store file
    pub store_path: PathBuf,
    /// USD to CNY rate for display prices; `None` renders them unavailable
    pub usd_cny_rate: Option<Decimal>,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = PathBuf::from(
            lookup("AUTOLOT_STORE_PATH").unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
        );
        let usd_cny_rate = parse_rate(
            "AUTOLOT_USD_CNY_RATE",
            &lookup("AUTOLOT_USD_CNY_RATE").unwrap_or_else(|| DEFAULT_USD_CNY_RATE.to_string()),
        )?;
        let log_format = lookup("AUTOLOT_LOG_FORMAT")
            .unwrap_or_default()
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTOLOT_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            store_path,
            usd_cny_rate,
            log_format,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            usd_cny_rate: Decimal::from_str(DEFAULT_USD_CNY_RATE).ok(),
            log_format: LogFormat::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an exchange rate. `off`, `none` and empty disable conversion.
fn parse_rate(key: &str, raw: &str) -> Result<Option<Decimal>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("off") || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let rate = Decimal::from_str(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if rate <= Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("rate must be positive (got {rate})"),
        ));
    }
    Ok(Some(rate))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store_path, PathBuf::from(".autolot/store.json"));
        assert_eq!(config.usd_cny_rate, Some(Decimal::new(72, 1)));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("AUTOLOT_STORE_PATH", "/tmp/autolot.json"),
            ("AUTOLOT_USD_CNY_RATE", "7.05"),
            ("AUTOLOT_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/autolot.json"));
        assert_eq!(config.usd_cny_rate, Some(Decimal::new(705, 2)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rate_can_be_disabled() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("AUTOLOT_USD_CNY_RATE", "off")])).unwrap();
        assert_eq!(config.usd_cny_rate, None);
    }

    #[test]
    fn test_invalid_rate() {
        for raw in ["abc", "0", "-1.5"] {
            let result = StorefrontConfig::from_lookup(lookup(&[("AUTOLOT_USD_CNY_RATE", raw)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "AUTOLOT_USD_CNY_RATE"),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_log_format() {
        let result = StorefrontConfig::from_lookup(lookup(&[("AUTOLOT_LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_matches_empty_environment() {
        let config = StorefrontConfig::default();
        assert_eq!(config.usd_cny_rate, Some(Decimal::new(72, 1)));
    }
}
