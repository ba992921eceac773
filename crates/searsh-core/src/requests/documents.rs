// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Document operations: index, get, delete.

use serde_json::Value;

use crate::client::{ApiRequest, HttpMethod, RawResponse};
use crate::document::{DocWriter, DocumentError, fields};
use crate::execute::ApiOperation;

use super::{copy_int, copy_string};

/// `PUT /{index}/_doc/{id}` (or `POST /{index}/_doc` without an id).
#[derive(Debug, Clone, Default)]
pub struct IndexDocumentRequest {
    /// Target index.
    pub index: String,
    /// Document id; the cluster assigns one when absent.
    pub id: Option<String>,
    /// Document source.
    pub source: Option<Value>,
    /// Whether to refresh the index after the write.
    pub refresh: bool,
}

impl ApiOperation for IndexDocumentRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.index.is_empty() {
            problems.push("index is missing".to_string());
        }
        if self.source.is_none() {
            problems.push("document source is missing".to_string());
        }
        problems
    }

    fn to_api_request(&self) -> ApiRequest {
        let mut request = match &self.id {
            Some(id) => ApiRequest::new(HttpMethod::Put, format!("/{}/_doc/{id}", self.index)),
            None => ApiRequest::new(HttpMethod::Post, format!("/{}/_doc", self.index)),
        };
        if self.refresh {
            request = request.param("refresh", "true");
        }
        if let Some(source) = &self.source {
            request = request.body(source.clone());
        }
        request
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        let body = &response.body;
        doc.start_object()?;
        doc.field(fields::OK, true)?;
        copy_string(body, fields::INDEX, doc)?;
        copy_string(body, fields::ID, doc)?;
        copy_int(body, fields::VERSION, doc)?;
        copy_string(body, fields::RESULT, doc)?;
        doc.end_object()
    }
}

/// `GET /{index}/_doc/{id}`
#[derive(Debug, Clone, Default)]
pub struct GetDocumentRequest {
    /// Target index.
    pub index: String,
    /// Document id.
    pub id: String,
}

impl ApiOperation for GetDocumentRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.index.is_empty() {
            problems.push("index is missing".to_string());
        }
        if self.id.is_empty() {
            problems.push("id is missing".to_string());
        }
        problems
    }

    fn to_api_request(&self) -> ApiRequest {
        ApiRequest::new(HttpMethod::Get, format!("/{}/_doc/{}", self.index, self.id))
    }

    // A missing document answers 404 with a well-formed body; that is a
    // result, not an error.
    fn accepts(&self, status: u16) -> bool {
        (200..300).contains(&status) || status == 404
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        let body = &response.body;
        doc.start_object()?;
        copy_string(body, fields::INDEX, doc)?;
        copy_string(body, fields::ID, doc)?;
        copy_int(body, fields::VERSION, doc)?;
        doc.field(
            fields::FOUND,
            body.get(fields::FOUND).and_then(Value::as_bool).unwrap_or(false),
        )?;
        if let Some(source) = body.get(fields::SOURCE) {
            doc.field(fields::SOURCE, source.clone())?;
        }
        doc.end_object()
    }
}

/// `DELETE /{index}/_doc/{id}`
#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentRequest {
    /// Target index.
    pub index: String,
    /// Document id.
    pub id: String,
    /// Whether to refresh the index after the delete.
    pub refresh: bool,
}

impl ApiOperation for DeleteDocumentRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.index.is_empty() {
            problems.push("index is missing".to_string());
        }
        if self.id.is_empty() {
            problems.push("id is missing".to_string());
        }
        problems
    }

    fn to_api_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(
            HttpMethod::Delete,
            format!("/{}/_doc/{}", self.index, self.id),
        );
        if self.refresh {
            request = request.param("refresh", "true");
        }
        request
    }

    // Deleting an absent document answers 404; still a result.
    fn accepts(&self, status: u16) -> bool {
        (200..300).contains(&status) || status == 404
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        let body = &response.body;
        let deleted = body.get(fields::RESULT).and_then(Value::as_str) == Some("deleted");
        doc.start_object()?;
        doc.field(fields::OK, true)?;
        doc.field(fields::FOUND, deleted)?;
        copy_string(body, fields::INDEX, doc)?;
        copy_string(body, fields::ID, doc)?;
        copy_int(body, fields::VERSION, doc)?;
        doc.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_request_with_id_puts() {
        let request = IndexDocumentRequest {
            index: "tweets".to_string(),
            id: Some("1".to_string()),
            source: Some(serde_json::json!({"user": "kimchy"})),
            refresh: false,
        };
        let api = request.to_api_request();
        assert_eq!(api.method, HttpMethod::Put);
        assert_eq!(api.path, "/tweets/_doc/1");
        assert!(api.body.is_some());
    }

    #[test]
    fn index_request_without_id_posts() {
        let request = IndexDocumentRequest {
            index: "tweets".to_string(),
            source: Some(serde_json::json!({})),
            ..IndexDocumentRequest::default()
        };
        let api = request.to_api_request();
        assert_eq!(api.method, HttpMethod::Post);
        assert_eq!(api.path, "/tweets/_doc");
    }

    #[test]
    fn index_validation_enumerates_all_problems() {
        let request = IndexDocumentRequest::default();
        let problems = request.validate();
        assert_eq!(
            problems,
            vec!["index is missing".to_string(), "document source is missing".to_string()]
        );
    }

    #[test]
    fn index_response_document() {
        let request = IndexDocumentRequest {
            index: "tweets".to_string(),
            id: Some("1".to_string()),
            source: Some(serde_json::json!({})),
            refresh: false,
        };
        let response = RawResponse {
            status: 201,
            body: serde_json::json!({
                "_index": "tweets", "_id": "1", "_version": 1, "result": "created"
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({
                "ok": true, "_index": "tweets", "_id": "1",
                "_version": 1, "result": "created"
            })
        );
    }

    #[test]
    fn get_accepts_404() {
        let request = GetDocumentRequest {
            index: "tweets".to_string(),
            id: "missing".to_string(),
        };
        assert!(request.accepts(200));
        assert!(request.accepts(404));
        assert!(!request.accepts(500));
    }

    #[test]
    fn get_found_document_includes_source() {
        let request = GetDocumentRequest {
            index: "tweets".to_string(),
            id: "1".to_string(),
        };
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({
                "_index": "tweets", "_id": "1", "_version": 2,
                "found": true, "_source": {"user": "kimchy"}
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(value[fields::FOUND], true);
        assert_eq!(value[fields::SOURCE], serde_json::json!({"user": "kimchy"}));
    }

    #[test]
    fn get_missing_document_omits_source() {
        let request = GetDocumentRequest {
            index: "tweets".to_string(),
            id: "2".to_string(),
        };
        let response = RawResponse {
            status: 404,
            body: serde_json::json!({"_index": "tweets", "_id": "2", "found": false}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(value[fields::FOUND], false);
        assert!(value.get(fields::SOURCE).is_none());
    }

    #[test]
    fn delete_reports_found_from_result() {
        let request = DeleteDocumentRequest {
            index: "tweets".to_string(),
            id: "1".to_string(),
            refresh: false,
        };
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({
                "_index": "tweets", "_id": "1", "_version": 3, "result": "deleted"
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(value[fields::OK], true);
        assert_eq!(value[fields::FOUND], true);

        let response = RawResponse {
            status: 404,
            body: serde_json::json!({"result": "not_found"}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(doc.into_value().unwrap()[fields::FOUND], false);
    }
}
