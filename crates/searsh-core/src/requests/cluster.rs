// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Cluster administration operations: health and state.

use serde_json::Value;

use crate::client::{ApiRequest, HttpMethod, RawResponse};
use crate::document::{DocWriter, DocumentError, fields};
use crate::execute::{ApiOperation, write_self_describing};

use super::{copy_bool, copy_int, indices_path};

/// Health status values a health request may wait for.
const HEALTH_STATUSES: &[&str] = &["green", "yellow", "red"];

/// Detail levels the health API understands.
const HEALTH_LEVELS: &[&str] = &["cluster", "indices", "shards"];

/// `GET /_cluster/health[/{indices}]`
#[derive(Debug, Clone, Default)]
pub struct ClusterHealthRequest {
    /// Indices to scope the health check to; empty means the whole cluster.
    pub indices: Vec<String>,
    /// Status to wait for (`green`, `yellow`, or `red`).
    pub wait_for_status: Option<String>,
    /// Wait timeout, e.g. `30s`.
    pub timeout: Option<String>,
    /// Response detail level (`cluster`, `indices`, or `shards`).
    pub level: Option<String>,
}

impl ApiOperation for ClusterHealthRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(status) = &self.wait_for_status {
            if !HEALTH_STATUSES.contains(&status.as_str()) {
                problems.push(format!(
                    "wait_for_status must be one of green, yellow, red (got '{status}')"
                ));
            }
        }
        if let Some(level) = &self.level {
            if !HEALTH_LEVELS.contains(&level.as_str()) {
                problems.push(format!(
                    "level must be one of cluster, indices, shards (got '{level}')"
                ));
            }
        }
        problems
    }

    fn to_api_request(&self) -> ApiRequest {
        let path = if self.indices.is_empty() {
            "/_cluster/health".to_string()
        } else {
            format!("/_cluster/health/{}", self.indices.join(","))
        };
        let mut request = ApiRequest::new(HttpMethod::Get, path);
        if let Some(status) = &self.wait_for_status {
            request = request.param("wait_for_status", status);
        }
        if let Some(timeout) = &self.timeout {
            request = request.param("timeout", timeout);
        }
        if let Some(level) = &self.level {
            request = request.param("level", level);
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
        if let Some(name) = body.get(fields::CLUSTER_NAME).and_then(Value::as_str) {
            doc.field(fields::CLUSTER_NAME, name)?;
        }
        if let Some(status) = body.get(fields::STATUS).and_then(Value::as_str) {
            doc.field(fields::STATUS, status.to_lowercase())?;
        }
        copy_bool(body, fields::TIMED_OUT, doc)?;
        for counter in [
            fields::NUMBER_OF_NODES,
            fields::NUMBER_OF_DATA_NODES,
            fields::ACTIVE_PRIMARY_SHARDS,
            fields::ACTIVE_SHARDS,
            fields::RELOCATING_SHARDS,
            fields::INITIALIZING_SHARDS,
            fields::UNASSIGNED_SHARDS,
        ] {
            copy_int(body, counter, doc)?;
        }
        doc.end_object()
    }
}

/// `GET /_cluster/state[/{indices}]`
///
/// The state response is arbitrarily deep and already a structured
/// document; it converts with the self-describing strategy.
#[derive(Debug, Clone, Default)]
pub struct ClusterStateRequest {
    /// Indices to scope routing/metadata sections to; empty means all.
    pub indices: Vec<String>,
}

impl ApiOperation for ClusterStateRequest {
    fn to_api_request(&self) -> ApiRequest {
        let path = if self.indices.is_empty() {
            "/_cluster/state".to_string()
        } else {
            format!("/_cluster/state/_all/{}", indices_path(&self.indices))
        };
        ApiRequest::new(HttpMethod::Get, path)
    }

    fn write_response(
        &self,
        response: &RawResponse,
        doc: &mut DocWriter,
    ) -> Result<(), DocumentError> {
        write_self_describing(response, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_path_without_indices() {
        let request = ClusterHealthRequest::default();
        assert_eq!(request.to_api_request().path, "/_cluster/health");
    }

    #[test]
    fn health_path_with_indices_and_params() {
        let request = ClusterHealthRequest {
            indices: vec!["tweets".to_string(), "users".to_string()],
            wait_for_status: Some("yellow".to_string()),
            timeout: Some("30s".to_string()),
            level: Some("indices".to_string()),
        };
        let api = request.to_api_request();
        assert_eq!(api.path, "/_cluster/health/tweets,users");
        assert_eq!(
            api.query,
            vec![
                ("wait_for_status".to_string(), "yellow".to_string()),
                ("timeout".to_string(), "30s".to_string()),
                ("level".to_string(), "indices".to_string()),
            ]
        );
    }

    #[test]
    fn health_validation_enumerates_all_problems() {
        let request = ClusterHealthRequest {
            wait_for_status: Some("purple".to_string()),
            level: Some("galaxy".to_string()),
            ..ClusterHealthRequest::default()
        };
        let problems = request.validate();
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn health_status_renders_lowercase() {
        let request = ClusterHealthRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({
                "cluster_name": "test",
                "status": "GREEN",
                "timed_out": false,
                "number_of_nodes": 1,
                "active_shards": 5
            }),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        let value = doc.into_value().unwrap();
        assert_eq!(value[fields::STATUS], "green");
        assert_eq!(value[fields::ACTIVE_SHARDS], 5);
        assert_eq!(value[fields::TIMED_OUT], false);
        // Counters the response did not carry are omitted, not nulled.
        assert!(value.get(fields::UNASSIGNED_SHARDS).is_none());
    }

    #[test]
    fn state_is_self_describing() {
        let request = ClusterStateRequest::default();
        let response = RawResponse {
            status: 200,
            body: serde_json::json!({"cluster_name": "test", "nodes": {}}),
        };
        let mut doc = DocWriter::new();
        request.write_response(&response, &mut doc).unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            serde_json::json!({"cluster_name": "test", "nodes": {}})
        );
    }
}
