//! Contract for the remote catalog/order service.

use async_trait::async_trait;

use crate::catalog::{Product, RegionStyle, StorefrontConfig};
use crate::checkout::OrderSubmission;
use crate::error::CatalogError;
use crate::ids::{CategoryId, OrderId, ProductId};

/// Request/response access to the catalog and order service.
///
/// Implementations hold no session state of their own. Every read is
/// side-effect free; [`CatalogClient::submit_order`] is the only call that
/// changes anything on the service and callers issue it at most once per
/// order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Brand and category configuration.
    async fn fetch_config(&self) -> Result<StorefrontConfig, CatalogError>;

    /// Every product in the catalog.
    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Products listed under a category.
    async fn fetch_products_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Products tagged with a regional style.
    async fn fetch_products_by_style(
        &self,
        style: RegionStyle,
    ) -> Result<Vec<Product>, CatalogError>;

    /// A single product. An unknown ID is `Ok(None)`, not an error.
    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Place an order and return the identifier the service assigned.
    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderId, CatalogError>;
}
