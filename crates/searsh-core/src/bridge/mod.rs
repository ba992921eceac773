// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Wiring between the request builders and the scripting scope.
//!
//! [`build_scope`] assembles everything the operator can reach:
//!
//! - the `es` client facade (`es.index()`, `es.admin().cluster()`, …);
//! - the `Requests` factory object mirroring the client builders;
//! - constructible request classes (`new SearchRequest()`, …);
//! - the universal prototype every object inherits
//!   (`toString`, `inspect`, `keys`, `type`, `equals`, `hash`).
//!
//! Every live method also exists as [`ApiRegistry`] metadata with its
//! declared return types, so completion keeps working after any call
//! expression without evaluating it.

mod builders;
mod universal;

use std::rc::Rc;

use ecow::EcoString;
use serde_json::Value;

use crate::client::ClusterClient;
use crate::script::{
    ApiRegistry, ClassRef, ObjectRef, ScriptError, ScriptObject, ScriptValue, TypeId,
};

/// Ids of every registered API type, shared by the builder constructors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ApiTypes {
    pub es_client: TypeId,
    pub admin: TypeId,
    pub cluster_admin: TypeId,
    pub indices_admin: TypeId,
    pub requests_factory: TypeId,
    pub cluster_health: TypeId,
    pub cluster_state: TypeId,
    pub create_index: TypeId,
    pub delete_index: TypeId,
    pub refresh: TypeId,
    pub index_doc: TypeId,
    pub get_doc: TypeId,
    pub delete_doc: TypeId,
    pub search: TypeId,
    pub count: TypeId,
    pub validate_query: TypeId,
}

/// Request classes exposed as constructors in the global scope.
const CONSTRUCTIBLE: &[(&str, fn(ApiTypes) -> TypeId)] = &[
    ("ClusterHealthRequest", |t| t.cluster_health),
    ("ClusterStateRequest", |t| t.cluster_state),
    ("CreateIndexRequest", |t| t.create_index),
    ("DeleteIndexRequest", |t| t.delete_index),
    ("RefreshRequest", |t| t.refresh),
    ("IndexRequest", |t| t.index_doc),
    ("GetRequest", |t| t.get_doc),
    ("DeleteRequest", |t| t.delete_doc),
    ("SearchRequest", |t| t.search),
    ("CountRequest", |t| t.count),
    ("ValidateQueryRequest", |t| t.validate_query),
];

/// Builds the scripting scope for a cluster client.
///
/// Returns the bindings object (assignments land there; its prototype
/// chain reaches the globals and the universal prototype) and the frozen
/// API registry.
#[must_use]
pub fn build_scope(client: Rc<dyn ClusterClient>) -> (ObjectRef, Rc<ApiRegistry>) {
    let mut registry = ApiRegistry::new();
    let types = register_types(&mut registry);
    register_members(&mut registry, types);

    let proto = universal::universal_prototype();
    builders::register_constructors(&mut registry, types, &client, &proto);
    let registry = Rc::new(registry);

    let mut globals = ScriptObject::with_prototype(&proto);
    globals.set("es", builders::es_client(&client, types, &proto));
    globals.set("Requests", builders::requests_factory(&client, types, &proto));
    for (name, id_of) in CONSTRUCTIBLE {
        globals.set(
            *name,
            ScriptValue::Constructor(ClassRef {
                id: id_of(types),
                name: EcoString::from(*name),
            }),
        );
    }
    globals.set(
        "version",
        ScriptValue::Str(EcoString::from(env!("CARGO_PKG_VERSION"))),
    );
    let globals = globals.into_ref();

    let bindings = ScriptObject::with_prototype(&globals).into_ref();
    (bindings, registry)
}

fn register_types(registry: &mut ApiRegistry) -> ApiTypes {
    ApiTypes {
        es_client: registry.add_type("EsClient"),
        admin: registry.add_type("AdminClient"),
        cluster_admin: registry.add_type("ClusterAdminClient"),
        indices_admin: registry.add_type("IndicesAdminClient"),
        requests_factory: registry.add_type("Requests"),
        cluster_health: registry.add_type("ClusterHealthRequest"),
        cluster_state: registry.add_type("ClusterStateRequest"),
        create_index: registry.add_type("CreateIndexRequest"),
        delete_index: registry.add_type("DeleteIndexRequest"),
        refresh: registry.add_type("RefreshRequest"),
        index_doc: registry.add_type("IndexRequest"),
        get_doc: registry.add_type("GetRequest"),
        delete_doc: registry.add_type("DeleteRequest"),
        search: registry.add_type("SearchRequest"),
        count: registry.add_type("CountRequest"),
        validate_query: registry.add_type("ValidateQueryRequest"),
    }
}

/// Mirrors every live method into registry metadata. The two must stay in
/// step: completion after a call expression resolves through this table.
fn register_members(registry: &mut ApiRegistry, t: ApiTypes) {
    registry.add_method(t.es_client, "index", &[t.index_doc]);
    registry.add_method(t.es_client, "get", &[t.get_doc]);
    registry.add_method(t.es_client, "delete", &[t.delete_doc]);
    registry.add_method(t.es_client, "search", &[t.search]);
    registry.add_method(t.es_client, "count", &[t.count]);
    registry.add_method(t.es_client, "validateQuery", &[t.validate_query]);
    registry.add_method(t.es_client, "admin", &[t.admin]);

    registry.add_method(t.admin, "cluster", &[t.cluster_admin]);
    registry.add_method(t.admin, "indices", &[t.indices_admin]);

    registry.add_method(t.cluster_admin, "health", &[t.cluster_health]);
    registry.add_method(t.cluster_admin, "state", &[t.cluster_state]);

    registry.add_method(t.indices_admin, "createIndex", &[t.create_index]);
    registry.add_method(t.indices_admin, "deleteIndex", &[t.delete_index]);
    registry.add_method(t.indices_admin, "refresh", &[t.refresh]);
    registry.add_method(t.indices_admin, "validateQuery", &[t.validate_query]);

    registry.add_method(t.requests_factory, "clusterHealthRequest", &[t.cluster_health]);
    registry.add_method(t.requests_factory, "clusterStateRequest", &[t.cluster_state]);
    registry.add_method(t.requests_factory, "createIndexRequest", &[t.create_index]);
    registry.add_method(t.requests_factory, "deleteIndexRequest", &[t.delete_index]);
    registry.add_method(t.requests_factory, "refreshRequest", &[t.refresh]);
    registry.add_method(t.requests_factory, "indexRequest", &[t.index_doc]);
    registry.add_method(t.requests_factory, "getRequest", &[t.get_doc]);
    registry.add_method(t.requests_factory, "deleteRequest", &[t.delete_doc]);
    registry.add_method(t.requests_factory, "searchRequest", &[t.search]);
    registry.add_method(t.requests_factory, "countRequest", &[t.count]);
    registry.add_method(t.requests_factory, "validateQueryRequest", &[t.validate_query]);

    for setter in ["indices", "waitForStatus", "timeout", "level"] {
        registry.add_method(t.cluster_health, setter, &[t.cluster_health]);
    }
    registry.add_method(t.cluster_state, "indices", &[t.cluster_state]);
    registry.add_method(t.create_index, "index", &[t.create_index]);
    registry.add_method(t.create_index, "settings", &[t.create_index]);
    registry.add_method(t.delete_index, "index", &[t.delete_index]);
    registry.add_method(t.refresh, "indices", &[t.refresh]);
    for setter in ["index", "id", "source", "refresh"] {
        registry.add_method(t.index_doc, setter, &[t.index_doc]);
    }
    for setter in ["index", "id"] {
        registry.add_method(t.get_doc, setter, &[t.get_doc]);
    }
    for setter in ["index", "id", "refresh"] {
        registry.add_method(t.delete_doc, setter, &[t.delete_doc]);
    }
    for setter in ["indices", "source", "queryString", "size", "from"] {
        registry.add_method(t.search, setter, &[t.search]);
    }
    for setter in ["indices", "query"] {
        registry.add_method(t.count, setter, &[t.count]);
    }
    for setter in ["indices", "query", "explain"] {
        registry.add_method(t.validate_query, setter, &[t.validate_query]);
    }

    // execute() is terminal on every builder: its result is a response
    // document, not a further API type.
    for builder in [
        t.cluster_health,
        t.cluster_state,
        t.create_index,
        t.delete_index,
        t.refresh,
        t.index_doc,
        t.get_doc,
        t.delete_doc,
        t.search,
        t.count,
        t.validate_query,
    ] {
        registry.add_method(builder, "execute", &[]);
    }
}

// === Argument coercion helpers shared by the native methods ===

pub(crate) fn string_arg(
    method: &str,
    args: &[ScriptValue],
    index: usize,
) -> Result<String, ScriptError> {
    match args.get(index) {
        Some(ScriptValue::Str(text)) => Ok(text.to_string()),
        Some(_) => Err(ScriptError::BadArgument {
            method: EcoString::from(method),
            index,
            expected: "a string",
        }),
        None => Err(ScriptError::MissingArgument {
            method: EcoString::from(method),
            index,
            expected: "a string",
        }),
    }
}

/// Collects every argument as a string (variadic index lists).
pub(crate) fn strings_args(
    method: &str,
    args: &[ScriptValue],
) -> Result<Vec<String>, ScriptError> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            ScriptValue::Str(text) => Ok(text.to_string()),
            _ => Err(ScriptError::BadArgument {
                method: EcoString::from(method),
                index,
                expected: "a string",
            }),
        })
        .collect()
}

/// Accepts a JSON literal directly, or a string holding JSON text.
pub(crate) fn json_arg(
    method: &str,
    args: &[ScriptValue],
    index: usize,
) -> Result<Value, ScriptError> {
    match args.get(index) {
        Some(ScriptValue::Json(value)) => Ok(value.clone()),
        Some(ScriptValue::Str(text)) => {
            serde_json::from_str(text).map_err(|_| ScriptError::BadArgument {
                method: EcoString::from(method),
                index,
                expected: "a JSON value",
            })
        }
        Some(_) => Err(ScriptError::BadArgument {
            method: EcoString::from(method),
            index,
            expected: "a JSON value",
        }),
        None => Err(ScriptError::MissingArgument {
            method: EcoString::from(method),
            index,
            expected: "a JSON value",
        }),
    }
}

/// Boolean argument defaulting to `default` when omitted, so `refresh()`
/// reads as `refresh(true)`.
pub(crate) fn bool_arg_or(
    method: &str,
    args: &[ScriptValue],
    index: usize,
    default: bool,
) -> Result<bool, ScriptError> {
    match args.get(index) {
        None => Ok(default),
        Some(ScriptValue::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ScriptError::BadArgument {
            method: EcoString::from(method),
            index,
            expected: "a boolean",
        }),
    }
}

pub(crate) fn u64_arg(
    method: &str,
    args: &[ScriptValue],
    index: usize,
) -> Result<u64, ScriptError> {
    match args.get(index) {
        Some(ScriptValue::Int(n)) if *n >= 0 => Ok(*n as u64),
        Some(_) => Err(ScriptError::BadArgument {
            method: EcoString::from(method),
            index,
            expected: "a non-negative integer",
        }),
        None => Err(ScriptError::MissingArgument {
            method: EcoString::from(method),
            index,
            expected: "a non-negative integer",
        }),
    }
}

pub(crate) fn no_args(method: &str, args: &[ScriptValue]) -> Result<(), ScriptError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ScriptError::UnexpectedArguments {
            method: EcoString::from(method),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiRequest, RawResponse, TransportError};
    use crate::completion::CompletionEngine;
    use crate::eval::Interpreter;

    /// Transport fake returning a canned body for every request.
    struct CannedClient {
        body: Value,
    }

    impl ClusterClient for CannedClient {
        fn submit(&self, _request: &ApiRequest) -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status: 200,
                body: self.body.clone(),
            })
        }

        fn endpoint(&self) -> &str {
            "http://test:9200"
        }
    }

    fn session(body: Value) -> (Interpreter, CompletionEngine) {
        let client: Rc<dyn ClusterClient> = Rc::new(CannedClient { body });
        let (bindings, registry) = build_scope(client);
        (
            Interpreter::new(bindings, Rc::clone(&registry)),
            CompletionEngine::new(registry),
        )
    }

    #[test]
    fn health_round_trip_through_the_facade() {
        let (mut interp, _) = session(serde_json::json!({
            "cluster_name": "test", "status": "green"
        }));
        let value = interp
            .eval("es.admin().cluster().health().execute()")
            .unwrap();
        let ScriptValue::Json(doc) = value else {
            panic!("expected a response document");
        };
        assert_eq!(doc["status"], "green");
    }

    #[test]
    fn fluent_setters_return_the_builder() {
        let (mut interp, _) = session(serde_json::json!({"count": 1}));
        let value = interp
            .eval("es.count().indices('tweets', 'users').execute()")
            .unwrap();
        assert!(matches!(value, ScriptValue::Json(doc) if doc["count"] == 1));
    }

    #[test]
    fn validation_errors_surface_verbatim() {
        let (mut interp, _) = session(Value::Null);
        let err = interp.eval("es.index().execute()").unwrap_err().to_string();
        assert!(err.contains("index is missing"));
        assert!(err.contains("document source is missing"));
    }

    #[test]
    fn requests_factory_mirrors_the_client() {
        let (mut interp, _) = session(serde_json::json!({"acknowledged": true}));
        let value = interp
            .eval("Requests.createIndexRequest().index('tweets').execute()")
            .unwrap();
        assert!(matches!(value, ScriptValue::Json(doc) if doc["acknowledged"] == true));
    }

    #[test]
    fn constructors_build_live_builders() {
        let (mut interp, _) = session(serde_json::json!({"count": 9}));
        let value = interp.eval("new CountRequest().execute()").unwrap();
        assert!(matches!(value, ScriptValue::Json(doc) if doc["count"] == 9));
    }

    #[test]
    fn completion_walks_the_facade_types() {
        let (interp, engine) = session(Value::Null);
        let buffer = "es.admin().cluster().hea";
        let completion = engine.complete(&interp.scope_value(), buffer, buffer.len());
        assert_eq!(completion.candidates, vec!["health()"]);
    }

    #[test]
    fn completion_sees_user_bindings() {
        let (mut interp, engine) = session(Value::Null);
        interp.eval("myIndex = 'tweets'").unwrap();
        let completion = engine.complete(&interp.scope_value(), "myIn", 4);
        assert_eq!(completion.candidates, vec!["myIndex"]);
    }

    #[test]
    fn completion_after_new_uses_the_registry() {
        let (interp, engine) = session(Value::Null);
        let buffer = "new SearchRequest().ind";
        let completion = engine.complete(&interp.scope_value(), buffer, buffer.len());
        assert_eq!(completion.candidates, vec!["indices()"]);
    }

    #[test]
    fn universal_methods_resolve_through_the_prototype_chain() {
        let (mut interp, _) = session(Value::Null);
        let value = interp.eval("es.type()").unwrap();
        assert!(matches!(value, ScriptValue::Str(s) if s == "object"));
        let value = interp.eval("es.admin().keys()").unwrap();
        let ScriptValue::Json(Value::Array(keys)) = value else {
            panic!("keys() should return an array");
        };
        assert!(keys.contains(&Value::String("cluster".to_string())));
    }

    #[test]
    fn string_arg_rejects_non_strings() {
        let err = string_arg("index", &[ScriptValue::Int(3)], 0).unwrap_err();
        assert!(matches!(err, ScriptError::BadArgument { .. }));
        let err = string_arg("index", &[], 0).unwrap_err();
        assert!(matches!(err, ScriptError::MissingArgument { .. }));
    }

    #[test]
    fn json_arg_accepts_json_strings() {
        let value = json_arg(
            "source",
            &[ScriptValue::Str(EcoString::from(r#"{"a": 1}"#))],
            0,
        )
        .unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }
}
