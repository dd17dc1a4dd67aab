//! HTTP access to the storefront catalog/order service.
//!
//! [`FetchClient`] builds requests against a base URL and sends them through a
//! [`Transport`] under a total timeout, retrying reads per a [`RetryPolicy`].
//! [`HttpCatalogClient`] maps the service's JSON endpoints onto the
//! [`CatalogClient`](storefront_commerce::catalog::CatalogClient) contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::HttpCatalogClient;
//! use storefront_commerce::prelude::*;
//!
//! let client = HttpCatalogClient::new(
//!     "https://catalog.example.com/api",
//!     TimeoutConfig::default(),
//!     RetryPolicy::new(2),
//! )?;
//! let config = client.fetch_config().await?;
//! let product = client.fetch_product(&ProductId::new("p1")).await?;
//! ```

mod catalog;
mod error;
mod request;
mod response;
mod retry;
mod timeout;
mod transport;

pub use catalog::HttpCatalogClient;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use timeout::TimeoutConfig;
pub use transport::{ReqwestTransport, Transport};

use std::collections::HashMap;

use reqwest::Url;
use tracing::Instrument;

/// HTTP client for the catalog service.
///
/// Paths are given as segments and percent-encoded onto the base URL, so
/// identifiers containing `/` or spaces stay one segment.
#[derive(Debug, Clone)]
pub struct FetchClient<T = ReqwestTransport> {
    base_url: Url,
    default_headers: HashMap<String, String>,
    transport: T,
    timeouts: TimeoutConfig,
    retry: RetryPolicy,
}

impl FetchClient<ReqwestTransport> {
    /// Create a client over a `reqwest` transport.
    pub fn new(base_url: &str, timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&timeouts)?;
        Ok(Self::with_transport(base_url, transport)?.with_timeouts(timeouts))
    }
}

impl<T: Transport> FetchClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            default_headers: HashMap::from([(
                "Accept".to_string(),
                "application/json".to_string(),
            )]),
            transport,
            timeouts: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        })
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The base URL with `segments` appended, each percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Create a GET request.
    pub fn get(&self, segments: &[&str]) -> Result<RequestBuilder, FetchError> {
        self.request(Method::Get, segments)
    }

    /// Create a POST request.
    pub fn post(&self, segments: &[&str]) -> Result<RequestBuilder, FetchError> {
        self.request(Method::Post, segments)
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, FetchError> {
        let url = self.url(segments)?;
        Ok(RequestBuilder::new(method, url.as_str()).headers(self.default_headers.clone()))
    }

    /// Send once under the total timeout.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let span = tracing::debug_span!(
            "fetch",
            method = request.method.as_str(),
            url = %request.url
        );
        async {
            let outcome = match tokio::time::timeout(
                self.timeouts.total,
                self.transport.send(request),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Timeout),
            };
            match &outcome {
                Ok(resp) => tracing::debug!(status = resp.status, "response received"),
                Err(e) => tracing::debug!(error = %e, "request failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Send, retrying transient failures per the retry policy.
    ///
    /// Only for requests that are safe to repeat.
    pub async fn send_with_retry(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            let outcome = self.send(request.clone()).await;
            if !self.retry.should_retry(&outcome, attempt) {
                return outcome;
            }

            let delay = self.retry.backoff.delay_for_attempt(attempt);
            attempt += 1;
            tracing::warn!(
                url = %request.url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FetchClient, FetchError, HttpCatalogClient, Method, Response, RetryPolicy, TimeoutConfig,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{json, ScriptedTransport};
    use std::time::Duration;

    fn client(transport: ScriptedTransport) -> FetchClient<ScriptedTransport> {
        FetchClient::with_transport("https://shop.test/api/", transport)
            .unwrap()
            .with_retry_policy(RetryPolicy::new(2).with_backoff(BackoffStrategy::None))
    }

    #[test]
    fn test_url_segments_are_percent_encoded() {
        let client = client(ScriptedTransport::default());
        assert_eq!(
            client.url(&["categories", "men/summer sale", "products"]).unwrap().as_str(),
            "https://shop.test/api/categories/men%2Fsummer%20sale/products"
        );
        assert_eq!(client.url(&["config"]).unwrap().as_str(), "https://shop.test/api/config");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            FetchClient::with_transport("not a url", ScriptedTransport::default()),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            FetchClient::with_transport("mailto:shop@example.com", ScriptedTransport::default()),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = client(ScriptedTransport::default()).with_default_header("X-Shop", "eu");
        let req = client.get(&["products"]).unwrap();
        assert_eq!(req.headers["Accept"], "application/json");
        assert_eq!(req.headers["X-Shop"], "eu");
    }

    #[tokio::test]
    async fn test_send_with_retry_recovers_from_server_error() {
        let client = client(ScriptedTransport::new([
            json(503, ""),
            Err(FetchError::RequestError("connection reset".into())),
            json(200, "[]"),
        ]));

        let resp = client
            .send_with_retry(client.get(&["products"]).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(client.transport().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_send_with_retry_gives_up_after_max_attempts() {
        let client = client(ScriptedTransport::new([
            json(500, ""),
            json(502, ""),
            json(503, ""),
            json(200, "[]"),
        ]));

        let resp = client
            .send_with_retry(client.get(&["products"]).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status, 503);
        assert_eq!(client.transport().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let client = client(ScriptedTransport::new([json(400, "bad request"), json(200, "[]")]));

        let resp = client
            .send_with_retry(client.get(&["products"]).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status, 400);
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let transport =
            ScriptedTransport::new([json(200, "{}")]).with_delay(Duration::from_millis(200));
        let client = client(transport)
            .with_timeouts(TimeoutConfig::from_total(Duration::from_millis(20)));

        let outcome = client.send(client.get(&["config"]).unwrap()).await;
        assert_eq!(outcome, Err(FetchError::Timeout));
    }
}
