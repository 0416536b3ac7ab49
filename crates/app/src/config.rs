//! Application configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SHOPCART_CURRENCY` | `USD` | Currency of the session cart |
//! | `SHOPCART_CATALOG` | embedded | Path to a catalog JSON file |
//! | `SHOPCART_LOG_FORMAT` | `json` | `json` or `pretty` |

use std::path::PathBuf;

use anyhow::Context;

use shopcart_core::Currency;
use shopcart_observability::LogFormat;

pub const CURRENCY_VAR: &str = "SHOPCART_CURRENCY";
pub const CATALOG_VAR: &str = "SHOPCART_CATALOG";
pub const LOG_FORMAT_VAR: &str = "SHOPCART_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub currency: Currency,
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            catalog_path: None,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(CURRENCY_VAR) {
            config.currency = raw
                .parse::<Currency>()
                .with_context(|| format!("invalid {CURRENCY_VAR}"))?;
        }
        if let Some(raw) = get(CATALOG_VAR) {
            config.catalog_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            (CURRENCY_VAR, "eur"),
            (CATALOG_VAR, "/tmp/plants.json"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/plants.json")));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(CURRENCY_VAR, "  ")])).unwrap();
        assert_eq!(config.currency, Currency::Usd);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(CURRENCY_VAR, "JPY")])).unwrap_err();
        assert!(err.to_string().contains(CURRENCY_VAR));

        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT_VAR));
    }
}
