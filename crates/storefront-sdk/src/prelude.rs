//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use storefront_sdk::prelude::*;
//! ```
//!
//! This imports the commerce prelude (cart, checkout, catalog types), the
//! HTTP client types, logging settings and the SDK entry points.

// Domain types
pub use storefront_commerce::prelude::*;

// HTTP client
pub use storefront_data::{FetchError, HttpCatalogClient, RetryPolicy, TimeoutConfig};

// Logging
pub use storefront_observability::{init_logging, LogConfig, LogFormat, LogLevel};

// SDK
pub use crate::{
    CatalogSettings, CheckoutSettings, Storefront, StorefrontClient, StorefrontSession,
    StorefrontSettings,
};
