//! HTTP client utilities for Souq.
//!
//! Provides a small, ergonomic API for talking to the marketplace backend
//! with automatic JSON handling. The wire is abstracted behind
//! [`Transport`] so services can be tested without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_data::{FetchClient, ReqwestTransport};
//! use std::sync::Arc;
//!
//! let client = FetchClient::new(Arc::new(ReqwestTransport::new()?))
//!     .with_base_url("http://127.0.0.1:8000/api");
//!
//! // Simple GET request
//! let stores: serde_json::Value = client.get("/stores").send().await?.json()?;
//!
//! // Form-encoded POST with a bearer token
//! client
//!     .post("/cart/add/42")
//!     .bearer_auth(token)
//!     .form([("quantity", "1")])
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! ```

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod request;
mod response;
mod transport;

pub use error::FetchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::collections::BTreeMap;
use std::sync::Arc;

/// HTTP client for making outbound requests.
///
/// A thin builder layer over a shared [`Transport`]. Cloning is cheap.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
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

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let builder = RequestBuilder::new(method, full_url).headers(
            self.default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ClientRequestBuilder {
            transport: Arc::clone(&self.transport),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as a string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.builder = self.builder.text(text);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as form-encoded pairs.
    pub fn form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.builder = self.builder.form(pairs);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Add a bearer token when one is available.
    pub fn maybe_bearer_auth(self, token: Option<&str>) -> Self {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Send the request and return the response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build()?;
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                tracing::error!(%method, %url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Request, Response, Transport};
}
