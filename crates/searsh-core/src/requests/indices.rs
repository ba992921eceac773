// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Index administration operations: create, delete, refresh.

use crate::client::{ApiRequest, HttpMethod, RawResponse};
use crate::document::{DocWriter, DocumentError, fields};
use crate::execute::ApiOperation;

use super::{copy_bool, copy_string, indices_path, write_shards};

/// `PUT /{index}` with optional settings body.
#[derive(Debug, Clone, Default)]
pub struct CreateIndexRequest {
    /// Name of the index to create.
    pub index: String,
    /// Optional settings/mappings body.
    pub settings: Option<serde_json::Value>,
}

impl ApiOperation for CreateIndexRequest {
    fn validate(&self) -> Vec<String> {
        if self.index.is_empty() {
            vec!["index is missing".to_string()]
        } else {
            Vec::new()
        }
    }

    fn to_api_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(HttpMethod::Put, format!("/{}", self.index));
        if let Some(settings) = &self.settings {
            request = request.body(settings.clone());
        }
        request
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        doc.start_object()?;
        doc.field(fields::OK, true)?;
        copy_bool(&response.body, fields::ACKNOWLEDGED, doc)?;
        copy_string(&response.body, fields::INDEX_NAME, doc)?;
        doc.end_object()
    }
}

/// `DELETE /{index}`
#[derive(Debug, Clone, Default)]
pub struct DeleteIndexRequest {
    /// Name of the index to delete.
    pub index: String,
}

impl ApiOperation for DeleteIndexRequest {
    fn validate(&self) -> Vec<String> {
        if self.index.is_empty() {
            vec!["index is missing".to_string()]
        } else {
            Vec::new()
        }
    }

    fn to_api_request(&self) -> ApiRequest {
        ApiRequest::new(HttpMethod::Delete, format!("/{}", self.index))
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        doc.start_object()?;
        doc.field(fields::OK, true)?;
        copy_bool(&response.body, fields::ACKNOWLEDGED, doc)?;
        doc.end_object()
    }
}

/// `POST /{indices}/_refresh`
#[derive(Debug, Clone, Default)]
pub struct RefreshRequest {
    /// Indices to refresh; empty means all.
    pub indices: Vec<String>,
}

impl ApiOperation for RefreshRequest {
    fn to_api_request(&self) -> ApiRequest {
        ApiRequest::new(
            HttpMethod::Post,
            format!("/{}/_refresh", indices_path(&self.indices)),
        )
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        doc.start_object()?;
        doc.field(fields::OK, true)?;
        write_shards(&response.body, doc)?;
        doc.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_index_put_with_settings() {
        let request = CreateIndexRequest {
            index: "tweets".to_string(),
            settings: Some(serde_json::json!({"settings": {"number_of_shards": 1}})),
        };
        let api = request.to_api_request();
        assert_eq!(api.method, HttpMethod::Put);
        assert_eq!(api.path, "/tweets");
        assert!(api.body.is_some());
    }

    #[test]
    fn create_index_requires_a_name() {
        assert_eq!(
            CreateIndexRequest::default().validate(),
            vec!["index is missing".to_string()]
        );
    }

    #[test]
    fn create_index_response_document() {
        let request = CreateIndexRequest {
            index: "tweets".to_string(),
            settings: None,
        };
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({"acknowledged": true, "index": "tweets"}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"ok": true, "acknowledged": true, "index": "tweets"})
        );
    }

    #[test]
    fn delete_index_response_document() {
        let request = DeleteIndexRequest {
            index: "tweets".to_string(),
        };
        assert_eq!(request.to_api_request().method, HttpMethod::Delete);
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({"acknowledged": true}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"ok": true, "acknowledged": true})
        );
    }

    #[test]
    fn refresh_path_joins_indices() {
        let request = RefreshRequest {
            indices: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(request.to_api_request().path, "/a,b/_refresh");
        assert_eq!(RefreshRequest::default().to_api_request().path, "/_all/_refresh");
    }

    #[test]
    fn refresh_response_includes_shards() {
        let request = RefreshRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({"_shards": {"total": 10, "successful": 10, "failed": 0}}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({
                "ok": true,
                "_shards": {"total": 10, "successful": 10, "failed": 0}
            })
        );
    }
}
