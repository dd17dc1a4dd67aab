//! `CatalogClient` over the service's JSON endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use storefront_commerce::catalog::{CatalogClient, Product, RegionStyle, StorefrontConfig};
use storefront_commerce::checkout::OrderSubmission;
use storefront_commerce::{CatalogError, CategoryId, OrderId, ProductId};

use crate::{FetchClient, FetchError, ReqwestTransport, RetryPolicy, TimeoutConfig, Transport};

/// Body of a successful `POST /orders`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderAccepted {
    order_id: OrderId,
}

/// Catalog and order service client speaking JSON over HTTP.
///
/// | operation | request |
/// |---|---|
/// | `fetch_config` | `GET /config` |
/// | `fetch_all_products` | `GET /products` |
/// | `fetch_products_by_category` | `GET /categories/{id}/products` |
/// | `fetch_products_by_style` | `GET /styles/{style}/products` |
/// | `fetch_product` | `GET /products/{id}` |
/// | `submit_order` | `POST /orders` |
///
/// Reads are retried per the client's retry policy. Orders are sent once.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient<T = ReqwestTransport> {
    fetch: FetchClient<T>,
}

impl HttpCatalogClient<ReqwestTransport> {
    pub fn new(
        base_url: &str,
        timeouts: TimeoutConfig,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let fetch = FetchClient::new(base_url, timeouts)?.with_retry_policy(retry);
        Ok(Self { fetch })
    }
}

impl<T: Transport> HttpCatalogClient<T> {
    pub fn from_fetch_client(fetch: FetchClient<T>) -> Self {
        Self { fetch }
    }

    pub fn fetch_client(&self) -> &FetchClient<T> {
        &self.fetch
    }

    async fn get_json<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R, CatalogError> {
        let request = self.fetch.get(segments)?;
        let response = self.fetch.send_with_retry(request).await?.error_for_status()?;
        Ok(response.json()?)
    }
}

#[async_trait]
impl<T: Transport> CatalogClient for HttpCatalogClient<T> {
    async fn fetch_config(&self) -> Result<StorefrontConfig, CatalogError> {
        self.get_json(&["config"]).await
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&["products"]).await
    }

    async fn fetch_products_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&["categories", category_id.as_str(), "products"])
            .await
    }

    async fn fetch_products_by_style(
        &self,
        style: RegionStyle,
    ) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&["styles", style.as_str(), "products"]).await
    }

    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let request = self.fetch.get(&["products", product_id.as_str()])?;
        let response = self.fetch.send_with_retry(request).await?;
        if response.is_not_found() {
            return Ok(None);
        }
        Ok(response.error_for_status()?.json()?)
    }

    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderId, CatalogError> {
        let request = self.fetch.post(&["orders"])?.json(order)?;
        let response = self.fetch.send(request).await?.error_for_status()?;
        let accepted: OrderAccepted = response.json()?;
        tracing::debug!(order_id = %accepted.order_id, "order accepted by service");
        Ok(accepted.order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{json, ScriptedTransport};
    use crate::{BackoffStrategy, Method};
    use storefront_commerce::cart::{Cart, CartLineInput};
    use storefront_commerce::checkout::BuyerForm;
    use storefront_commerce::CurrencyCode;

    const PRODUCT: &str = r#"{
        "id": "p1",
        "categoryId": "men",
        "name": "Linen Shirt",
        "description": "Breathable summer shirt",
        "price": 4500,
        "currency": "EUR",
        "stockCount": 3,
        "inStock": true,
        "sizes": ["S", "M"],
        "colors": [],
        "imageUrl": "/img/p1.jpg",
        "styleTags": ["italian"]
    }"#;

    fn client(transport: ScriptedTransport) -> HttpCatalogClient<ScriptedTransport> {
        let fetch = FetchClient::with_transport("https://shop.test/api", transport)
            .unwrap()
            .with_retry_policy(RetryPolicy::new(1).with_backoff(BackoffStrategy::None));
        HttpCatalogClient::from_fetch_client(fetch)
    }

    fn requested_urls(client: &HttpCatalogClient<ScriptedTransport>) -> Vec<String> {
        client
            .fetch_client()
            .transport()
            .requests()
            .into_iter()
            .map(|r| r.url)
            .collect()
    }

    fn order() -> OrderSubmission {
        let mut cart = Cart::new();
        cart.add_item(
            CartLineInput::new("p1", "Linen Shirt", 4500, "EUR")
                .with_size("M")
                .with_quantity(2),
        );
        OrderSubmission::from_cart(
            &cart,
            &BuyerForm::new("Ada", "ada@example.com", "1 Main St"),
            &CurrencyCode::default(),
        )
    }

    #[tokio::test]
    async fn test_fetch_products_by_category() {
        let client = client(ScriptedTransport::new([json(200, &format!("[{PRODUCT}]"))]));

        let products = client
            .fetch_products_by_category(&CategoryId::new("men"))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Linen Shirt");
        assert_eq!(products[0].price, 4500);
        assert!(products[0].has_style(RegionStyle::Italian));
        assert_eq!(
            requested_urls(&client),
            vec!["https://shop.test/api/categories/men/products"]
        );
    }

    #[tokio::test]
    async fn test_fetch_products_by_style_uses_wire_name() {
        let client = client(ScriptedTransport::new([json(200, "[]")]));

        let products = client
            .fetch_products_by_style(RegionStyle::SouthAmerican)
            .await
            .unwrap();
        assert!(products.is_empty());
        assert_eq!(
            requested_urls(&client),
            vec!["https://shop.test/api/styles/southAmerican/products"]
        );
    }

    #[tokio::test]
    async fn test_fetch_product_absent_is_none() {
        let client = client(ScriptedTransport::new([
            json(404, "not found"),
            json(200, "null"),
            json(200, PRODUCT),
        ]));

        assert_eq!(client.fetch_product(&ProductId::new("gone")).await, Ok(None));
        assert_eq!(client.fetch_product(&ProductId::new("gone")).await, Ok(None));
        let found = client.fetch_product(&ProductId::new("p1")).await.unwrap();
        assert_eq!(found.map(|p| p.stock_count), Some(3));
    }

    #[tokio::test]
    async fn test_reads_retry_then_report_http_error() {
        let client = client(ScriptedTransport::new([
            json(500, "boom"),
            json(500, "still boom"),
        ]));

        assert_eq!(
            client.fetch_config().await,
            Err(CatalogError::Http {
                status: 500,
                message: "still boom".to_string(),
            })
        );
        assert_eq!(requested_urls(&client).len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_config_is_decode_error() {
        let client = client(ScriptedTransport::new([json(200, r#"{"brandName": 7}"#)]));
        assert!(matches!(
            client.fetch_config().await,
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_order_posts_payload_once() {
        let client = client(ScriptedTransport::new([json(201, r#"{"orderId": "ord-77"}"#)]));

        let order_id = client.submit_order(&order()).await.unwrap();
        assert_eq!(order_id.as_str(), "ord-77");

        let requests = client.fetch_client().transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://shop.test/api/orders");
        let body: serde_json::Value =
            serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["buyerEmail"], "ada@example.com");
        assert_eq!(body["lineItems"][0]["size"], "M");
        assert_eq!(body["currency"], "EUR");
    }

    #[tokio::test]
    async fn test_submit_order_is_never_retried() {
        let client = client(ScriptedTransport::new([
            json(503, ""),
            json(201, r#"{"orderId": "dup"}"#),
        ]));

        let err = client.submit_order(&order()).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::Http {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
        );
        assert_eq!(requested_urls(&client).len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_on_submit() {
        let client = client(ScriptedTransport::new([Err(FetchError::RequestError(
            "connection refused".into(),
        ))]));
        assert!(matches!(
            client.submit_order(&order()).await,
            Err(CatalogError::Transport(_))
        ));
    }
}
