//! Product catalog module.
//!
//! Contains catalog records, the client contract for the catalog/order
//! service, and the rules for turning a product choice into a cart line.

mod cache;
mod category;
mod client;
pub(crate) mod product;
mod selection;
mod style;

pub use cache::{CachedCatalogClient, DEFAULT_CONFIG_TTL};
pub use category::{Category, StorefrontConfig};
pub use client::CatalogClient;
#[cfg(test)]
pub use client::MockCatalogClient;
pub use product::{Product, StockStatus, LOW_STOCK_THRESHOLD};
pub use selection::ProductSelection;
pub use style::{filter_by_style, RegionStyle, StyleFilter};
