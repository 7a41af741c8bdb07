// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, USER_AGENT};
use std::pin::Pin;

/// Browser-like User-Agent sent with every request.
///
/// The audio origins answer 403 Forbidden to requests without one.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// A streaming response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// The response headers the pipeline cares about, as raw strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Content-Length header value, if present (unparsed)
    pub content_length: Option<String>,
}

impl ResponseHeaders {
    fn from_header_map(headers: &HeaderMap) -> Self {
        let get = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
        };

        Self {
            content_type: get(CONTENT_TYPE),
            content_length: get(CONTENT_LENGTH),
        }
    }

    /// Content-Length parsed as a byte count
    pub fn content_length_bytes(&self) -> Option<u64> {
        self.content_length.as_deref().and_then(|v| v.parse().ok())
    }
}

/// Fully buffered response
pub struct BytesResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

/// Header-only response from a probe
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// HTTP status code of the final (post-redirect) response
    pub status: u16,
    pub headers: ResponseHeaders,
}

/// HTTP response with status, headers, and body stream
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    pub headers: ResponseHeaders,
    /// Response body as a stream of bytes
    pub body: ByteStream,
}

/// Whether a status code is in the 2xx range
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// HTTP client abstraction for testability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch the entire response body as bytes
    async fn get_bytes(&self, url: &str) -> Result<BytesResponse, reqwest::Error>;

    /// Issue a HEAD request, following redirects
    async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error>;

    /// Get a streaming response for large downloads
    async fn get_stream(&self, url: &str) -> Result<HttpResponse, reqwest::Error>;
}

/// Default HTTP client implementation using reqwest
///
/// Redirects are followed by reqwest's default policy.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default settings
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestClient with a custom reqwest::Client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_bytes(&self, url: &str) -> Result<BytesResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(BytesResponse { status, body })
    }

    async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error> {
        // Read the header map directly: Response::content_length() reports
        // the (empty) body size for HEAD, not the advertised length.
        let response = self
            .client
            .head(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        Ok(HeadResponse {
            status: response.status().as_u16(),
            headers: ResponseHeaders::from_header_map(response.headers()),
        })
    }

    async fn get_stream(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        use futures::StreamExt;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        let status = response.status().as_u16();
        let headers = ResponseHeaders::from_header_map(response.headers());

        let body: ByteStream = Box::pin(response.bytes_stream().map(|result| result));

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
