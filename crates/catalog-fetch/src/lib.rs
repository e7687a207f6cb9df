//! HTTP transport for the catalog backend.
//!
//! Shares request/response plumbing across endpoint groups: a base URL,
//! JSON default headers, a transport timeout, and one normalized error
//! message per failure. Providers hold a [`FetchClient`] rather than
//! extending it.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_fetch::{FetchClient, TimeoutConfig};
//!
//! let client = FetchClient::new("http://localhost:8000/api", TimeoutConfig::default())?;
//!
//! // Simple GET request
//! let product: Product = client.get_json("/products/1/").await?;
//!
//! // GET with query parameters
//! let page: BackendPage<Product> = client
//!     .get("/products/")
//!     .query("search", "nike")
//!     .send()
//!     .await?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod timeout;

pub use error::{error_message, status_message, FetchError};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use timeout::TimeoutConfig;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// HTTP client for the backend API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client for `base_url` with JSON default headers.
    pub fn new(base_url: impl Into<String>, timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(Self {
            http,
            base_url: base_url.into(),
            default_headers,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request.
    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, path)
    }

    /// Create a request with a custom method.
    ///
    /// Absolute URLs are used as-is; anything else is appended to the
    /// base URL.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder {
        let path = path.into();
        let full_url = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.get(path).send().await?.json()
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        self.post(path).json(body)?.send().await?.json()
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        self.put(path).json(body)?.send().await?.json()
    }

    /// DELETE a path, ignoring any response body.
    pub async fn delete_path(&self, path: &str) -> Result<(), FetchError> {
        self.delete(path).send().await.map(|_| ())
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Append several query parameters.
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request.
    ///
    /// Non-2xx responses become [`FetchError::Http`] carrying the
    /// normalized backend message.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.full_url()?;
        let method = self.builder.method;
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.into(), url.clone());
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            debug!(%method, %url, error = %e, "request did not complete");
            FetchError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(FetchError::from)?.to_vec();

        debug!(%method, %url, status, bytes = body.len(), "received response");
        Response::new(status, body).error_for_status()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, TimeoutConfig};
}
