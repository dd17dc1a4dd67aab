//! Read-through cache for the storefront configuration.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::catalog::{CatalogClient, Product, RegionStyle, StorefrontConfig};
use crate::checkout::OrderSubmission;
use crate::error::CatalogError;
use crate::ids::{CategoryId, OrderId, ProductId};

/// How long a fetched configuration stays fresh by default.
pub const DEFAULT_CONFIG_TTL: Duration = Duration::from_secs(5 * 60);

/// Wraps a [`CatalogClient`] and caches `fetch_config` for a fixed TTL.
///
/// Product reads and order submission always go to the inner client.
#[derive(Debug)]
pub struct CachedCatalogClient<C> {
    inner: C,
    ttl: Duration,
    config: Mutex<Option<(Instant, StorefrontConfig)>>,
}

impl<C> CachedCatalogClient<C> {
    /// Wrap a client with the default TTL.
    pub fn new(inner: C) -> Self {
        Self::with_ttl(inner, DEFAULT_CONFIG_TTL)
    }

    /// Wrap a client with an explicit TTL.
    pub fn with_ttl(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            config: Mutex::new(None),
        }
    }

    /// Drop the cached configuration.
    pub fn invalidate(&self) {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Access the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn fresh_config(&self) -> Option<StorefrontConfig> {
        let cached = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        match cached.as_ref() {
            Some((fetched_at, config)) if fetched_at.elapsed() < self.ttl => Some(config.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl<C: CatalogClient> CatalogClient for CachedCatalogClient<C> {
    async fn fetch_config(&self) -> Result<StorefrontConfig, CatalogError> {
        if let Some(config) = self.fresh_config() {
            tracing::trace!("storefront config served from cache");
            return Ok(config);
        }

        let config = self.inner.fetch_config().await?;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((Instant::now(), config.clone()));
        Ok(config)
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.inner.fetch_all_products().await
    }

    async fn fetch_products_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        self.inner.fetch_products_by_category(category_id).await
    }

    async fn fetch_products_by_style(
        &self,
        style: RegionStyle,
    ) -> Result<Vec<Product>, CatalogError> {
        self.inner.fetch_products_by_style(style).await
    }

    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        self.inner.fetch_product(product_id).await
    }

    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderId, CatalogError> {
        self.inner.submit_order(order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalogClient;

    fn config(brand: &str) -> StorefrontConfig {
        StorefrontConfig {
            brand_name: brand.to_string(),
            ..StorefrontConfig::default()
        }
    }

    #[tokio::test]
    async fn test_config_is_cached_within_ttl() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_config()
            .times(1)
            .returning(|| Ok(config("Little Threads")));

        let client = CachedCatalogClient::new(mock);
        assert_eq!(client.fetch_config().await.unwrap().brand_name, "Little Threads");
        assert_eq!(client.fetch_config().await.unwrap().brand_name, "Little Threads");
    }

    #[tokio::test]
    async fn test_expired_config_is_refetched() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_config()
            .times(2)
            .returning(|| Ok(config("Little Threads")));

        let client = CachedCatalogClient::with_ttl(mock, Duration::ZERO);
        client.fetch_config().await.unwrap();
        client.fetch_config().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let mut mock = MockCatalogClient::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_fetch_config()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(CatalogError::Timeout));
        mock.expect_fetch_config()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(config("Recovered")));

        let client = CachedCatalogClient::new(mock);
        assert_eq!(client.fetch_config().await, Err(CatalogError::Timeout));
        assert_eq!(client.fetch_config().await.unwrap().brand_name, "Recovered");
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_config()
            .times(2)
            .returning(|| Ok(config("Little Threads")));

        let client = CachedCatalogClient::new(mock);
        client.fetch_config().await.unwrap();
        client.invalidate();
        client.fetch_config().await.unwrap();
    }

    #[tokio::test]
    async fn test_product_reads_pass_through() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_product()
            .times(2)
            .returning(|_| Ok(None));

        let client = CachedCatalogClient::new(mock);
        let id = ProductId::new("missing");
        assert_eq!(client.fetch_product(&id).await.unwrap(), None);
        assert_eq!(client.fetch_product(&id).await.unwrap(), None);
    }
}
