//! # Storefront SDK
//!
//! Wires the storefront core to a running catalog/order service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_sdk::prelude::*;
//!
//! let settings = StorefrontSettings::load("storefront.toml")?;
//! let session = Storefront::init(&settings)?;
//!
//! let config = session.client().fetch_config().await?;
//! let listing = session
//!     .browse(&config.default_category().unwrap().id, StyleFilter::All)
//!     .await?;
//! session.quick_add(&listing[0])?;
//!
//! let checkout = session.begin_checkout();
//! ```
//!
//! ## Crates
//!
//! - `storefront-commerce`: cart, checkout coordinator, catalog contract
//! - `storefront-data`: HTTP client for the catalog/order service
//! - `storefront-observability`: logging setup

pub mod prelude;
mod settings;

pub use settings::{CatalogSettings, CheckoutSettings, StorefrontSettings};

// Re-export crates for advanced usage
pub use storefront_commerce as commerce;
pub use storefront_data as data;
pub use storefront_observability as observability;

use std::sync::Arc;

use anyhow::{Context, Result};
use storefront_commerce::catalog::CachedCatalogClient;
use storefront_commerce::ShopSession;
use storefront_data::HttpCatalogClient;

/// Catalog client used by a configured storefront.
pub type StorefrontClient = CachedCatalogClient<HttpCatalogClient>;

/// A session over the configured catalog/order service.
pub type StorefrontSession = ShopSession<StorefrontClient>;

/// Entry points for a configured storefront.
pub struct Storefront;

impl Storefront {
    /// Build a fresh shopper session from settings.
    pub fn connect(settings: &StorefrontSettings) -> Result<StorefrontSession> {
        settings.validate()?;
        let catalog = &settings.catalog;

        let http = HttpCatalogClient::new(
            &catalog.base_url,
            catalog.timeouts(),
            catalog.retry_policy(),
        )
        .with_context(|| format!("Failed to create catalog client for {}", catalog.base_url))?;
        let client = CachedCatalogClient::with_ttl(http, catalog.config_ttl());

        tracing::info!(
            base_url = %catalog.base_url,
            timeout_ms = catalog.timeout_ms,
            read_retries = catalog.read_retries,
            "storefront connected"
        );

        Ok(ShopSession::new(Arc::new(client))
            .with_default_currency(settings.checkout.default_currency.clone()))
    }

    /// Install logging, then [`Storefront::connect`].
    pub fn init(settings: &StorefrontSettings) -> Result<StorefrontSession> {
        storefront_observability::init_logging(&settings.logging)
            .context("Failed to initialise logging")?;
        Self::connect(settings)
    }
}
