//! Storefront settings file.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::CurrencyCode;
use storefront_data::{RetryPolicy, TimeoutConfig};
use storefront_observability::LogConfig;

/// Settings for one storefront process.
///
/// Every section and field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontSettings {
    /// Catalog/order service access.
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,

    #[serde(default)]
    pub logging: LogConfig,
}

impl StorefrontSettings {
    /// Load settings from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON settings: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML settings: {}", path.display()))?
        };

        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse TOML settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.catalog.base_url.trim().is_empty(),
            "catalog.base_url must not be empty"
        );
        ensure!(self.catalog.timeout_ms > 0, "catalog.timeout_ms must be positive");
        ensure!(
            !self.checkout.default_currency.as_str().is_empty(),
            "checkout.default_currency must not be empty"
        );
        Ok(())
    }
}

/// The `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog/order service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total time allowed for one request attempt.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries for read requests. Orders are never retried.
    #[serde(default = "default_read_retries")]
    pub read_retries: u32,

    /// How long the storefront configuration is cached.
    #[serde(default = "default_config_ttl_secs")]
    pub config_ttl_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_read_retries() -> u32 {
    2
}

fn default_config_ttl_secs() -> u64 {
    300
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            read_retries: default_read_retries(),
            config_ttl_secs: default_config_ttl_secs(),
        }
    }
}

impl CatalogSettings {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.read_retries)
    }

    pub fn config_ttl(&self) -> Duration {
        Duration::from_secs(self.config_ttl_secs)
    }
}

/// The `[checkout]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Currency for totals of an empty cart.
    #[serde(default)]
    pub default_currency: CurrencyCode,
}
