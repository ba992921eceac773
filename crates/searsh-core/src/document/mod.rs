// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Forward-only structured document writer.
//!
//! Response converters render cluster responses through [`DocWriter`]: a
//! tree-shaped, write-once builder with object/array/field/value
//! operations and no seeking. Misuse is a [`DocumentError`], never a
//! panic — conversion errors are recovered by the executor and degrade to
//! an empty result.
//!
//! Shared output field names live in [`fields`], so the document shape
//! stays identical across every builder that emits the same concept.

use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;

/// Output field names shared across response converters.
///
/// The names are the wire contract with the operator: a key must never be
/// renamed between releases for the same request/response pair.
pub mod fields {
    /// Boolean success flag on write-style responses.
    pub const OK: &str = "ok";
    /// Acknowledgement flag on admin responses.
    pub const ACKNOWLEDGED: &str = "acknowledged";
    /// Cluster name on health responses.
    pub const CLUSTER_NAME: &str = "cluster_name";
    /// Health status, always rendered lowercase.
    pub const STATUS: &str = "status";
    /// Whether a health wait timed out.
    pub const TIMED_OUT: &str = "timed_out";
    /// Node counter on health responses.
    pub const NUMBER_OF_NODES: &str = "number_of_nodes";
    /// Data-node counter on health responses.
    pub const NUMBER_OF_DATA_NODES: &str = "number_of_data_nodes";
    /// Shard counter on health responses.
    pub const ACTIVE_PRIMARY_SHARDS: &str = "active_primary_shards";
    /// Shard counter on health responses.
    pub const ACTIVE_SHARDS: &str = "active_shards";
    /// Shard counter on health responses.
    pub const RELOCATING_SHARDS: &str = "relocating_shards";
    /// Shard counter on health responses.
    pub const INITIALIZING_SHARDS: &str = "initializing_shards";
    /// Shard counter on health responses.
    pub const UNASSIGNED_SHARDS: &str = "unassigned_shards";
    /// Index name on document responses.
    pub const INDEX: &str = "_index";
    /// Document id on document responses.
    pub const ID: &str = "_id";
    /// Document version on document responses.
    pub const VERSION: &str = "_version";
    /// Operation result (`created`, `updated`, `deleted`), lowercase.
    pub const RESULT: &str = "result";
    /// Whether a document was found.
    pub const FOUND: &str = "found";
    /// Document source on get responses.
    pub const SOURCE: &str = "_source";
    /// Hit counter on count responses.
    pub const COUNT: &str = "count";
    /// Shard summary object.
    pub const SHARDS: &str = "_shards";
    /// Total shards in a shard summary.
    pub const TOTAL: &str = "total";
    /// Successful shards in a shard summary.
    pub const SUCCESSFUL: &str = "successful";
    /// Failed shards in a shard summary.
    pub const FAILED: &str = "failed";
    /// Query validity flag on validate responses.
    pub const VALID: &str = "valid";
    /// Validation failure list; omitted entirely when empty.
    pub const VALIDATION_FAILURES: &str = "validation_failures";
    /// Index name on admin responses (plain, not underscored).
    pub const INDEX_NAME: &str = "index";
}

/// An error raised by incorrect writer usage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DocumentError {
    /// `field` called outside an open object.
    #[error("field '{0}' written outside of an object")]
    FieldOutsideObject(String),

    /// `value` called outside an open array.
    #[error("value written outside of an array")]
    ValueOutsideArray,

    /// A nested container inside an object was started without a name.
    #[error("a container nested in an object requires a name")]
    MissingName,

    /// `end_object` without a matching open object.
    #[error("no open object to end")]
    UnbalancedObject,

    /// `end_array` without a matching open array.
    #[error("no open array to end")]
    UnbalancedArray,

    /// A write was attempted after the root container was closed.
    #[error("document is already complete")]
    Complete,

    /// The document was finished with containers still open.
    #[error("document incomplete: {0} container(s) still open")]
    Incomplete(usize),

    /// The document was finished without writing anything.
    #[error("empty document")]
    Empty,
}

enum Frame {
    Object {
        name: Option<String>,
        entries: Map<String, Value>,
    },
    Array {
        name: Option<String>,
        items: Vec<Value>,
    },
}

/// Forward-only tree writer producing a JSON document.
pub struct DocWriter {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl DocWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// Opens the root object, or an unnamed object inside an array.
    ///
    /// # Errors
    ///
    /// Fails inside an object (a name is required there) or after the
    /// root container has been closed.
    pub fn start_object(&mut self) -> Result<(), DocumentError> {
        self.start_object_frame(None)
    }

    /// Opens a named object inside the current object.
    ///
    /// # Errors
    ///
    /// Fails when the document is already complete.
    pub fn start_object_named(&mut self, name: &str) -> Result<(), DocumentError> {
        self.start_object_frame(Some(name.to_string()))
    }

    fn start_object_frame(&mut self, name: Option<String>) -> Result<(), DocumentError> {
        if self.root.is_some() {
            return Err(DocumentError::Complete);
        }
        if name.is_none() && matches!(self.stack.last(), Some(Frame::Object { .. })) {
            return Err(DocumentError::MissingName);
        }
        self.stack.push(Frame::Object {
            name,
            entries: Map::new(),
        });
        Ok(())
    }

    /// Opens a named array inside the current object.
    ///
    /// # Errors
    ///
    /// Fails outside an object or after the document is complete.
    pub fn start_array(&mut self, name: &str) -> Result<(), DocumentError> {
        if self.root.is_some() {
            return Err(DocumentError::Complete);
        }
        if !matches!(self.stack.last(), Some(Frame::Object { .. })) {
            return Err(DocumentError::FieldOutsideObject(name.to_string()));
        }
        self.stack.push(Frame::Array {
            name: Some(name.to_string()),
            items: Vec::new(),
        });
        Ok(())
    }

    /// Writes a named field into the current object.
    ///
    /// # Errors
    ///
    /// Fails when no object is open.
    pub fn field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            Some(Frame::Object { entries, .. }) => {
                entries.insert(name.to_string(), value.into());
                Ok(())
            }
            _ => Err(DocumentError::FieldOutsideObject(name.to_string())),
        }
    }

    /// Appends a value to the current array.
    ///
    /// # Errors
    ///
    /// Fails when no array is open.
    pub fn value(&mut self, value: impl Into<Value>) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            Some(Frame::Array { items, .. }) => {
                items.push(value.into());
                Ok(())
            }
            _ => Err(DocumentError::ValueOutsideArray),
        }
    }

    /// Closes the current object.
    ///
    /// # Errors
    ///
    /// Fails when the innermost open container is not an object.
    pub fn end_object(&mut self) -> Result<(), DocumentError> {
        match self.stack.pop() {
            Some(Frame::Object { name, entries }) => self.attach(name, Value::Object(entries)),
            Some(frame) => {
                self.stack.push(frame);
                Err(DocumentError::UnbalancedObject)
            }
            None => Err(DocumentError::UnbalancedObject),
        }
    }

    /// Closes the current array.
    ///
    /// # Errors
    ///
    /// Fails when the innermost open container is not an array.
    pub fn end_array(&mut self) -> Result<(), DocumentError> {
        match self.stack.pop() {
            Some(Frame::Array { name, items }) => self.attach(name, Value::Array(items)),
            Some(frame) => {
                self.stack.push(frame);
                Err(DocumentError::UnbalancedArray)
            }
            None => Err(DocumentError::UnbalancedArray),
        }
    }

    fn attach(&mut self, name: Option<String>, value: Value) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            None => {
                self.root = Some(value);
                Ok(())
            }
            Some(Frame::Object { entries, .. }) => match name {
                Some(name) => {
                    entries.insert(name, value);
                    Ok(())
                }
                None => Err(DocumentError::MissingName),
            },
            Some(Frame::Array { items, .. }) => {
                items.push(value);
                Ok(())
            }
        }
    }

    /// Finishes the document and returns the built value.
    ///
    /// # Errors
    ///
    /// Fails when containers are still open or nothing was written.
    pub fn into_value(self) -> Result<Value, DocumentError> {
        if !self.stack.is_empty() {
            return Err(DocumentError::Incomplete(self.stack.len()));
        }
        self.root.ok_or(DocumentError::Empty)
    }

    /// Finishes the document and renders it as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails when containers are still open or nothing was written.
    pub fn into_string(self) -> Result<String, DocumentError> {
        let value = self.into_value()?;
        // Serializing an owned `Value` cannot fail; fall back to the
        // compact form rather than panicking if it ever does.
        Ok(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl Default for DocWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_object() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.field(fields::OK, true).unwrap();
        doc.field(fields::COUNT, 3).unwrap();
        doc.end_object().unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"ok": true, "count": 3})
        );
    }

    #[test]
    fn nested_object_and_array() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.start_object_named(fields::SHARDS).unwrap();
        doc.field(fields::TOTAL, 5).unwrap();
        doc.end_object().unwrap();
        doc.start_array(fields::VALIDATION_FAILURES).unwrap();
        doc.value("first").unwrap();
        doc.value("second").unwrap();
        doc.end_array().unwrap();
        doc.end_object().unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({
                "_shards": {"total": 5},
                "validation_failures": ["first", "second"]
            })
        );
    }

    #[test]
    fn field_outside_object_is_an_error() {
        let mut doc = DocWriter::new();
        assert_eq!(
            doc.field("x", 1),
            Err(DocumentError::FieldOutsideObject("x".to_string()))
        );
    }

    #[test]
    fn value_outside_array_is_an_error() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        assert_eq!(doc.value(1), Err(DocumentError::ValueOutsideArray));
    }

    #[test]
    fn unnamed_object_inside_object_is_an_error() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        assert_eq!(doc.start_object(), Err(DocumentError::MissingName));
    }

    #[test]
    fn mismatched_end_is_an_error() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.start_array("xs").unwrap();
        assert_eq!(doc.end_object(), Err(DocumentError::UnbalancedObject));
        // The array frame is still intact afterwards.
        doc.value(1).unwrap();
        doc.end_array().unwrap();
        doc.end_object().unwrap();
        assert!(doc.into_value().is_ok());
    }

    #[test]
    fn incomplete_document_is_an_error() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        assert_eq!(doc.into_value(), Err(DocumentError::Incomplete(1)));
    }

    #[test]
    fn empty_document_is_an_error() {
        let doc = DocWriter::new();
        assert_eq!(doc.into_value(), Err(DocumentError::Empty));
    }

    #[test]
    fn writes_after_completion_are_errors() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.end_object().unwrap();
        assert_eq!(doc.start_object(), Err(DocumentError::Complete));
    }

    #[test]
    fn into_string_pretty_prints() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.field(fields::OK, true).unwrap();
        doc.end_object().unwrap();
        let text = doc.into_string().unwrap();
        assert!(text.contains("\"ok\": true"));
    }

    #[test]
    fn objects_nest_inside_arrays_without_names() {
        let mut doc = DocWriter::new();
        doc.start_object().unwrap();
        doc.start_array("hits").unwrap();
        doc.start_object().unwrap();
        doc.field("id", "a").unwrap();
        doc.end_object().unwrap();
        doc.end_array().unwrap();
        doc.end_object().unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"hits": [{"id": "a"}]})
        );
    }
}
