// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Request validation, execution, and response conversion.
//!
//! [`RequestExecutor`] drives every API operation through the same
//! three-step contract:
//!
//! 1. **Validate** — the request enumerates *all* of its problems; any
//!    problem fails the call before the network is touched.
//! 2. **Execute** — one blocking round trip through the
//!    [`ClusterClient`](crate::client::ClusterClient); no retries here.
//! 3. **Convert** — the operation renders the response through a
//!    [`DocWriter`]. Conversion failures are logged and degrade to no
//!    output; they never reach the operator as an error.
//!
//! Operations choose between two conversion strategies: an explicit
//! field-by-field tree (the common case), or [`write_self_describing`]
//! for responses that already are structured documents.

use std::rc::Rc;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::client::{ApiRequest, ClusterClient, RawResponse, TransportError};
use crate::document::{DocWriter, DocumentError};

/// A request that failed its self-validation.
///
/// All discovered problems are carried and rendered together; execution
/// is never attempted partially.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("request validation failed: {}", .problems.join("; "))]
pub struct ValidationError {
    /// Every problem found, in discovery order.
    pub problems: Vec<String>,
}

/// An error raised while executing an operation.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecuteError {
    /// The request failed self-validation; nothing was submitted.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    /// The transport could not deliver the request.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),

    /// The cluster answered with a status the operation does not accept.
    #[error("cluster request failed with status {status}: {reason}")]
    Cluster {
        /// HTTP status code.
        status: u16,
        /// Reason extracted from the error body.
        reason: String,
    },
}

/// One cluster API operation: request shape, validation, and response
/// conversion.
pub trait ApiOperation {
    /// Enumerates every validation problem. An empty list means the
    /// request may be submitted.
    fn validate(&self) -> Vec<String> {
        Vec::new()
    }

    /// Builds the transport request from the configured state.
    fn to_api_request(&self) -> ApiRequest;

    /// Whether `status` carries a meaningful response for this operation.
    ///
    /// Defaults to 2xx; operations like document get override this to
    /// also accept 404.
    fn accepts(&self, status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Renders the response through the document writer.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] on writer misuse; the executor
    /// recovers it.
    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError>;
}

/// Owns one request and executes it against the cluster.
///
/// Not safe for concurrent reuse: the request is mutated by the single
/// configuring thread and consumed by `execute`.
pub struct RequestExecutor<R: ApiOperation> {
    request: R,
    client: Rc<dyn ClusterClient>,
}

impl<R: ApiOperation> RequestExecutor<R> {
    /// Creates an executor owning `request`.
    #[must_use]
    pub fn new(client: Rc<dyn ClusterClient>, request: R) -> Self {
        Self { request, client }
    }

    /// The owned request.
    #[must_use]
    pub fn request(&self) -> &R {
        &self.request
    }

    /// Mutable access for fluent configuration.
    pub fn request_mut(&mut self) -> &mut R {
        &mut self.request
    }

    /// Validates, submits, and converts.
    ///
    /// Returns `Ok(None)` when the response document could not be
    /// rendered (the failure is logged, the operator sees no result).
    ///
    /// # Errors
    ///
    /// Validation, transport, and rejected-status errors propagate; they
    /// are surfaced to the operator verbatim.
    pub fn execute(&self) -> Result<Option<Value>, ExecuteError> {
        let problems = self.request.validate();
        if !problems.is_empty() {
            return Err(ValidationError { problems }.into());
        }

        let api_request = self.request.to_api_request();
        debug!(method = %api_request.method, path = %api_request.path, "executing request");
        let response = self.client.submit(&api_request)?;

        if !self.request.accepts(response.status) {
            return Err(ExecuteError::Cluster {
                status: response.status,
                reason: error_reason(&response.body),
            });
        }

        let mut doc = DocWriter::new();
        let rendered = self
            .request
            .write_response(&response, &mut doc)
            .and_then(|()| doc.into_value());
        match rendered {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!(error = %e, "failed to render response document");
                Ok(None)
            }
        }
    }
}

/// Extracts a human-readable reason from a cluster error body.
fn error_reason(body: &Value) -> String {
    if let Some(reason) = body
        .get("error")
        .and_then(|e| e.get("reason"))
        .and_then(Value::as_str)
    {
        return reason.to_string();
    }
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    match body {
        Value::Null => "no response body".to_string(),
        other => other.to_string(),
    }
}

/// Conversion strategy for responses that already are structured
/// documents: the body is written through as-is, wrapped in a top-level
/// object when it is not one itself.
///
/// # Errors
///
/// Returns a [`DocumentError`] on writer misuse.
pub fn write_self_describing(
    response: &RawResponse,
    doc: &mut DocWriter,
) -> Result<(), DocumentError> {
    doc.start_object()?;
    match &response.body {
        Value::Object(map) => {
            for (name, value) in map {
                doc.field(name, value.clone())?;
            }
        }
        other => {
            doc.field("value", other.clone())?;
        }
    }
    doc.end_object()
}
