// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Concrete API operations.
//!
//! Each operation is a thin application of the executor contract: a
//! request struct with public configuration fields, self-validation that
//! enumerates every problem, a transport-request builder, and a response
//! converter writing the operation's output document.
//!
//! Conversion conventions shared by every operation:
//! - enumerations (health status, operation results) render lowercase;
//! - counters render as plain integers;
//! - empty collections are omitted entirely, never written as `[]`;
//! - fields absent from the cluster response are omitted, not nulled.

mod cluster;
mod documents;
mod indices;
mod search;

pub use cluster::{ClusterHealthRequest, ClusterStateRequest};
pub use documents::{DeleteDocumentRequest, GetDocumentRequest, IndexDocumentRequest};
pub use indices::{CreateIndexRequest, DeleteIndexRequest, RefreshRequest};
pub use search::{CountRequest, SearchRequest, ValidateQueryRequest};

use serde_json::Value;

use crate::document::{DocWriter, DocumentError, fields};

/// Joins index names for a request path; no indices means `_all`.
///
/// Multi-value path parameters are a repeating Elasticsearch convention:
/// comma-joined, with `_all` as the empty-set spelling.
pub(crate) fn indices_path(indices: &[String]) -> String {
    if indices.is_empty() {
        "_all".to_string()
    } else {
        indices.join(",")
    }
}

/// Copies a string field from the response body, omitting it when absent.
pub(crate) fn copy_string(
    body: &Value,
    name: &str,
    doc: &mut DocWriter,
) -> Result<(), DocumentError> {
    if let Some(text) = body.get(name).and_then(Value::as_str) {
        doc.field(name, text)?;
    }
    Ok(())
}

/// Copies an integer field from the response body, omitting it when absent.
pub(crate) fn copy_int(body: &Value, name: &str, doc: &mut DocWriter) -> Result<(), DocumentError> {
    if let Some(number) = body.get(name).and_then(Value::as_i64) {
        doc.field(name, number)?;
    }
    Ok(())
}

/// Copies a boolean field from the response body, omitting it when absent.
pub(crate) fn copy_bool(
    body: &Value,
    name: &str,
    doc: &mut DocWriter,
) -> Result<(), DocumentError> {
    if let Some(flag) = body.get(name).and_then(Value::as_bool) {
        doc.field(name, flag)?;
    }
    Ok(())
}

/// Writes the `_shards` summary object when the response carries one.
pub(crate) fn write_shards(body: &Value, doc: &mut DocWriter) -> Result<(), DocumentError> {
    if let Some(shards) = body.get(fields::SHARDS).filter(|s| s.is_object()) {
        doc.start_object_named(fields::SHARDS)?;
        for name in [fields::TOTAL, fields::SUCCESSFUL, fields::FAILED] {
            copy_int(shards, name, doc)?;
        }
        doc.end_object()?;
    }
    Ok(())
}

/// Wraps a query clause into a request body: a value that already has a
/// top-level `query` key is passed through, a bare clause is wrapped.
pub(crate) fn query_body(query: &Value) -> Value {
    if query.get("query").is_some() {
        query.clone()
    } else {
        serde_json::json!({ "query": query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_path_defaults_to_all() {
        assert_eq!(indices_path(&[]), "_all");
        assert_eq!(indices_path(&["a".to_string()]), "a");
        assert_eq!(
            indices_path(&["a".to_string(), "b".to_string()]),
            "a,b"
        );
    }

    #[test]
    fn write_shards_omitted_when_absent() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        write_shards(&serde_json::json!({}), &mut doc).unwrap();
        doc.end_object().unwrap();
        assert_eq!(doc.into_value().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn write_shards_copies_counters() {
        let body = serde_json::json!({"_shards": {"total": 5, "successful": 5, "failed": 0}});
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        write_shards(&body, &mut doc).unwrap();
        doc.end_object().unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"_shards": {"total": 5, "successful": 5, "failed": 0}})
        );
    }

    #[test]
    fn query_body_wraps_bare_clauses() {
        let clause = serde_json::json!({"match_all": {}});
        assert_eq!(
            query_body(&clause),
            serde_json::json!({"query": {"match_all": {}}})
        );
        let full = serde_json::json!({"query": {"match_all": {}}, "size": 2});
        assert_eq!(query_body(&full), full);
    }
}
