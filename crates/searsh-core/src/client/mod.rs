// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport to the Elasticsearch cluster.
//!
//! Builders talk to the cluster exclusively through the [`ClusterClient`]
//! trait, so tests substitute a recording fake and the executor never
//! knows whether a real network is behind it. [`HttpClusterClient`] is
//! the production implementation: one blocking round trip per submit, no
//! retries — retry and timeout policy belong to the transport
//! configuration, not to this layer.

use std::fmt;
use std::time::Duration;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// HTTP method of a cluster request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        write!(f, "{text}")
    }
}

/// A fully configured request ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the cluster base URL, e.g. `/_cluster/health`.
    pub path: String,
    /// Query-string parameters, in order.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with no parameters and no body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Adds a query-string parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A raw response: HTTP status plus parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed body; [`Value::Null`] when the body was empty.
    pub body: Value,
}

/// Transport abstraction over the cluster.
pub trait ClusterClient {
    /// Submits a request and blocks until the response arrives.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot be delivered
    /// or the response body is not JSON. Non-2xx statuses are *not*
    /// transport errors — operations decide which statuses they accept.
    fn submit(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;

    /// The base URL this client talks to, for operator display.
    fn endpoint(&self) -> &str;
}

/// An error raised by the HTTP transport.
#[derive(Debug, Error, Diagnostic)]
pub enum TransportError {
    /// The HTTP client could not be initialized.
    #[error("failed to initialize HTTP client: {source}")]
    Client {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The request could not be delivered or the response not read.
    #[error("request to {url} failed: {source}")]
    #[diagnostic(help("is the cluster reachable? check the URL with :hosts or SEARSH_URL"))]
    Request {
        /// The full request URL.
        url: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The response body was not valid JSON.
    #[error("cluster returned a non-JSON response: {source}")]
    InvalidBody {
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Blocking HTTP client over a single cluster base URL.
pub struct HttpClusterClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpClusterClient {
    /// Creates a client for `base_url`, with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be built.
    pub fn connect(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|source| TransportError::Client { source })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl fmt::Debug for HttpClusterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClusterClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClusterClient for HttpClusterClient {
    fn submit(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, %url, "submitting cluster request");
        let response = builder.send().map_err(|source| TransportError::Request {
            url: url.clone(),
            source,
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|source| TransportError::Request { url, source })?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| TransportError::InvalidBody { source })?
        };
        debug!(status, "cluster response received");
        Ok(RawResponse { status, body })
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_request_builder_accumulates() {
        let request = ApiRequest::new(HttpMethod::Get, "/_cluster/health")
            .param("level", "indices")
            .param("timeout", "30s");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/_cluster/health");
        assert_eq!(
            request.query,
            vec![
                ("level".to_string(), "indices".to_string()),
                ("timeout".to_string(), "30s".to_string())
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn connect_normalizes_trailing_slash() {
        let client = HttpClusterClient::connect("http://localhost:9200/", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9200");
    }

    #[test]
    fn http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
