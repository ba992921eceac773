// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Search-side operations: search, count, validate query.

use serde_json::Value;

use crate::client::{ApiRequest, HttpMethod, RawResponse};
use crate::document::{DocWriter, DocumentError, fields};
use crate::execute::{ApiOperation, write_self_describing};

use super::{copy_bool, copy_int, indices_path, query_body, write_shards};

/// `POST /{indices}/_search`
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Indices to search; empty means all.
    pub indices: Vec<String>,
    /// Full request body (a bare query clause is wrapped).
    pub source: Option<Value>,
    /// Lucene query string, sent as the `q` parameter.
    pub query_string: Option<String>,
    /// Maximum hits to return.
    pub size: Option<u64>,
    /// Hit offset.
    pub from: Option<u64>,
}

impl ApiOperation for SearchRequest {
    fn validate(&self) -> Vec<String> {
        if self.source.is_some() && self.query_string.is_some() {
            vec!["cannot combine a request body with a query string".to_string()]
        } else {
            Vec::new()
        }
    }

    fn to_api_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(
            HttpMethod::Post,
            format!("/{}/_search", indices_path(&self.indices)),
        );
        if let Some(source) = &self.source {
            request = request.body(query_body(source));
        }
        if let Some(q) = &self.query_string {
            request = request.param("q", q);
        }
        if let Some(size) = self.size {
            request = request.param("size", size.to_string());
        }
        if let Some(from) = self.from {
            request = request.param("from", from.to_string());
        }
        request
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        // Search responses are already shaped for the operator.
        write_self_describing(response, doc)
    }
}

/// `POST /{indices}/_count`
#[derive(Debug, Clone, Default)]
pub struct CountRequest {
    /// Indices to count over; empty means all.
    pub indices: Vec<String>,
    /// Optional query clause restricting the count.
    pub query: Option<Value>,
}

impl ApiOperation for CountRequest {
    fn to_api_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(
            HttpMethod::Post,
            format!("/{}/_count", indices_path(&self.indices)),
        );
        if let Some(query) = &self.query {
            request = request.body(query_body(query));
        }
        request
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        doc.start_object()?;
        copy_int(&response.body, fields::COUNT, doc)?;
        write_shards(&response.body, doc)?;
        doc.end_object()
    }
}

/// `POST /{indices}/_validate/query`
#[derive(Debug, Clone, Default)]
pub struct ValidateQueryRequest {
    /// Indices to validate against; empty means all.
    pub indices: Vec<String>,
    /// The query clause to validate.
    pub query: Option<Value>,
    /// Whether to ask the cluster for failure explanations.
    pub explain: bool,
}

impl ApiOperation for ValidateQueryRequest {
    fn to_api_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(
            HttpMethod::Post,
            format!("/{}/_validate/query", indices_path(&self.indices)),
        );
        if self.explain {
            request = request.param("explain", "true");
        }
        if let Some(query) = &self.query {
            request = request.body(query_body(query));
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
        copy_bool(body, fields::VALID, doc)?;
        write_shards(body, doc)?;

        // Failure explanations, in response order. The array is omitted
        // entirely when there are none.
        let failures: Vec<&str> = body
            .get("explanations")
            .and_then(Value::as_array)
            .map(|explanations| {
                explanations
                    .iter()
                    .filter_map(|e| e.get("error").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        if !failures.is_empty() {
            doc.start_array(fields::VALIDATION_FAILURES)?;
            for failure in failures {
                doc.value(failure)?;
            }
            doc.end_array()?;
        }
        doc.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_path_and_params() {
        let request = SearchRequest {
            indices: vec!["tweets".to_string()],
            query_string: Some("user:kimchy".to_string()),
            size: Some(10),
            from: Some(20),
            ..SearchRequest::default()
        };
        let api = request.to_api_request();
        assert_eq!(api.path, "/tweets/_search");
        assert_eq!(
            api.query,
            vec![
                ("q".to_string(), "user:kimchy".to_string()),
                ("size".to_string(), "10".to_string()),
                ("from".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn search_wraps_bare_query_clauses() {
        let request = SearchRequest {
            source: Some(serde_json::json!({"match_all": {}})),
            ..SearchRequest::default()
        };
        assert_eq!(
            request.to_api_request().body.unwrap(),
            serde_json::json!({"query": {"match_all": {}}})
        );
    }

    #[test]
    fn search_rejects_body_plus_query_string() {
        let request = SearchRequest {
            source: Some(serde_json::json!({"match_all": {}})),
            query_string: Some("x".to_string()),
            ..SearchRequest::default()
        };
        assert_eq!(request.validate().len(), 1);
    }

    #[test]
    fn count_response_document() {
        let request = CountRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({
                "count": 42,
                "_shards": {"total": 5, "successful": 5, "failed": 0}
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({
                "count": 42,
                "_shards": {"total": 5, "successful": 5, "failed": 0}
            })
        );
    }

    #[test]
    fn validate_query_omits_empty_failures() {
        let request = ValidateQueryRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({"valid": true, "explanations": []}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(value[fields::VALID], true);
        assert!(value.get(fields::VALIDATION_FAILURES).is_none());
    }

    #[test]
    fn validate_query_preserves_failure_order() {
        let request = ValidateQueryRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({
                "valid": false,
                "explanations": [
                    {"index": "a", "valid": false, "error": "first failure"},
                    {"index": "b", "valid": true},
                    {"index": "c", "valid": false, "error": "second failure"}
                ]
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(
            value[fields::VALIDATION_FAILURES],
            serde_json::json!(["first failure", "second failure"])
        );
    }

    #[test]
    fn validate_query_explain_param() {
        let request = ValidateQueryRequest {
            explain: true,
            ..ValidateQueryRequest::default()
        };
        assert_eq!(
            request.to_api_request().query,
            vec![("explain".to_string(), "true".to_string())]
        );
    }
}
