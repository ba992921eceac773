// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Script-facing builder objects.
//!
//! Each function wraps one request type into a live object: fluent
//! setters mutate the executor-owned request and return the receiver,
//! `execute()` runs the validate/submit/convert pipeline and returns the
//! response document. The objects carry their registry class so the
//! completion engine can keep walking after a call expression.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::ClusterClient;
use crate::execute::{ApiOperation, RequestExecutor};
use crate::requests::{
    ClusterHealthRequest, ClusterStateRequest, CountRequest, CreateIndexRequest,
    DeleteDocumentRequest, DeleteIndexRequest, GetDocumentRequest, IndexDocumentRequest,
    RefreshRequest, SearchRequest, ValidateQueryRequest,
};
use crate::script::{ApiRegistry, ObjectRef, ScriptError, ScriptObject, ScriptValue};

use super::{ApiTypes, bool_arg_or, json_arg, no_args, string_arg, strings_args, u64_arg};

type Exec<R> = Rc<RefCell<RequestExecutor<R>>>;

fn executor<R: ApiOperation>(client: &Rc<dyn ClusterClient>, request: R) -> Exec<R> {
    Rc::new(RefCell::new(RequestExecutor::new(Rc::clone(client), request)))
}

/// Runs the executor, mapping its outcome into script space. Execution
/// and validation failures surface verbatim; a conversion failure has
/// already been logged and shows as no result.
fn run_execute<R: ApiOperation>(exec: &Exec<R>) -> Result<ScriptValue, ScriptError> {
    match exec.borrow().execute() {
        Ok(Some(value)) => Ok(ScriptValue::Json(value)),
        Ok(None) => Ok(ScriptValue::Null),
        Err(e) => Err(ScriptError::Execution(e.to_string())),
    }
}

/// The `es` client facade.
pub(crate) fn es_client(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
) -> ScriptValue {
    let mut obj = ScriptObject::with_class(types.es_client, proto);

    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("index", &[types.index_doc], move |_, args| {
        no_args("index", args)?;
        Ok(index_document(&c, types, &p, IndexDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("get", &[types.get_doc], move |_, args| {
        no_args("get", args)?;
        Ok(get_document(&c, types, &p, GetDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("delete", &[types.delete_doc], move |_, args| {
        no_args("delete", args)?;
        Ok(delete_document(&c, types, &p, DeleteDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("search", &[types.search], move |_, args| {
        no_args("search", args)?;
        Ok(search(&c, types, &p, SearchRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("count", &[types.count], move |_, args| {
        no_args("count", args)?;
        Ok(count(&c, types, &p, CountRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("validateQuery", &[types.validate_query], move |_, args| {
        no_args("validateQuery", args)?;
        Ok(validate_query(&c, types, &p, ValidateQueryRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("admin", &[types.admin], move |_, args| {
        no_args("admin", args)?;
        Ok(admin_client(&c, types, &p))
    });

    ScriptValue::Object(obj.into_ref())
}

/// The `es.admin()` facade.
fn admin_client(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
) -> ScriptValue {
    let mut obj = ScriptObject::with_class(types.admin, proto);
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("cluster", &[types.cluster_admin], move |_, args| {
        no_args("cluster", args)?;
        Ok(cluster_admin_client(&c, types, &p))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("indices", &[types.indices_admin], move |_, args| {
        no_args("indices", args)?;
        Ok(indices_admin_client(&c, types, &p))
    });
    ScriptValue::Object(obj.into_ref())
}

fn cluster_admin_client(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
) -> ScriptValue {
    let mut obj = ScriptObject::with_class(types.cluster_admin, proto);
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("health", &[types.cluster_health], move |_, args| {
        no_args("health", args)?;
        Ok(cluster_health(&c, types, &p, ClusterHealthRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("state", &[types.cluster_state], move |_, args| {
        no_args("state", args)?;
        Ok(cluster_state(&c, types, &p, ClusterStateRequest::default()))
    });
    ScriptValue::Object(obj.into_ref())
}

fn indices_admin_client(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
) -> ScriptValue {
    let mut obj = ScriptObject::with_class(types.indices_admin, proto);
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("createIndex", &[types.create_index], move |_, args| {
        no_args("createIndex", args)?;
        Ok(create_index(&c, types, &p, CreateIndexRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("deleteIndex", &[types.delete_index], move |_, args| {
        no_args("deleteIndex", args)?;
        Ok(delete_index(&c, types, &p, DeleteIndexRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("refresh", &[types.refresh], move |_, args| {
        no_args("refresh", args)?;
        Ok(refresh(&c, types, &p, RefreshRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("validateQuery", &[types.validate_query], move |_, args| {
        no_args("validateQuery", args)?;
        Ok(validate_query(&c, types, &p, ValidateQueryRequest::default()))
    });
    ScriptValue::Object(obj.into_ref())
}

/// The `Requests` factory object mirroring the client builders.
pub(crate) fn requests_factory(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
) -> ScriptValue {
    let mut obj = ScriptObject::with_class(types.requests_factory, proto);

    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("clusterHealthRequest", &[types.cluster_health], move |_, args| {
        no_args("clusterHealthRequest", args)?;
        Ok(cluster_health(&c, types, &p, ClusterHealthRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("clusterStateRequest", &[types.cluster_state], move |_, args| {
        no_args("clusterStateRequest", args)?;
        Ok(cluster_state(&c, types, &p, ClusterStateRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("createIndexRequest", &[types.create_index], move |_, args| {
        no_args("createIndexRequest", args)?;
        Ok(create_index(&c, types, &p, CreateIndexRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("deleteIndexRequest", &[types.delete_index], move |_, args| {
        no_args("deleteIndexRequest", args)?;
        Ok(delete_index(&c, types, &p, DeleteIndexRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("refreshRequest", &[types.refresh], move |_, args| {
        no_args("refreshRequest", args)?;
        Ok(refresh(&c, types, &p, RefreshRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("indexRequest", &[types.index_doc], move |_, args| {
        no_args("indexRequest", args)?;
        Ok(index_document(&c, types, &p, IndexDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("getRequest", &[types.get_doc], move |_, args| {
        no_args("getRequest", args)?;
        Ok(get_document(&c, types, &p, GetDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("deleteRequest", &[types.delete_doc], move |_, args| {
        no_args("deleteRequest", args)?;
        Ok(delete_document(&c, types, &p, DeleteDocumentRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("searchRequest", &[types.search], move |_, args| {
        no_args("searchRequest", args)?;
        Ok(search(&c, types, &p, SearchRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("countRequest", &[types.count], move |_, args| {
        no_args("countRequest", args)?;
        Ok(count(&c, types, &p, CountRequest::default()))
    });
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    obj.define_method("validateQueryRequest", &[types.validate_query], move |_, args| {
        no_args("validateQueryRequest", args)?;
        Ok(validate_query(&c, types, &p, ValidateQueryRequest::default()))
    });

    ScriptValue::Object(obj.into_ref())
}

/// Installs `new` constructors for the request classes. A constructor
/// accepts the target index (or indices) as optional leading string
/// arguments.
pub(crate) fn register_constructors(
    registry: &mut ApiRegistry,
    types: ApiTypes,
    client: &Rc<dyn ClusterClient>,
    proto: &ObjectRef,
) {
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.cluster_health,
        Rc::new(move |args| {
            let request = ClusterHealthRequest {
                indices: strings_args("new ClusterHealthRequest", args)?,
                ..ClusterHealthRequest::default()
            };
            Ok(cluster_health(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.cluster_state,
        Rc::new(move |args| {
            let request = ClusterStateRequest {
                indices: strings_args("new ClusterStateRequest", args)?,
            };
            Ok(cluster_state(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.create_index,
        Rc::new(move |args| {
            let mut request = CreateIndexRequest::default();
            if !args.is_empty() {
                request.index = string_arg("new CreateIndexRequest", args, 0)?;
            }
            Ok(create_index(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.delete_index,
        Rc::new(move |args| {
            let mut request = DeleteIndexRequest::default();
            if !args.is_empty() {
                request.index = string_arg("new DeleteIndexRequest", args, 0)?;
            }
            Ok(delete_index(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.refresh,
        Rc::new(move |args| {
            let request = RefreshRequest {
                indices: strings_args("new RefreshRequest", args)?,
            };
            Ok(refresh(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.index_doc,
        Rc::new(move |args| {
            let mut request = IndexDocumentRequest::default();
            if !args.is_empty() {
                request.index = string_arg("new IndexRequest", args, 0)?;
            }
            Ok(index_document(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.get_doc,
        Rc::new(move |args| {
            let mut request = GetDocumentRequest::default();
            if !args.is_empty() {
                request.index = string_arg("new GetRequest", args, 0)?;
            }
            if args.len() > 1 {
                request.id = string_arg("new GetRequest", args, 1)?;
            }
            Ok(get_document(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.delete_doc,
        Rc::new(move |args| {
            let mut request = DeleteDocumentRequest::default();
            if !args.is_empty() {
                request.index = string_arg("new DeleteRequest", args, 0)?;
            }
            if args.len() > 1 {
                request.id = string_arg("new DeleteRequest", args, 1)?;
            }
            Ok(delete_document(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.search,
        Rc::new(move |args| {
            let request = SearchRequest {
                indices: strings_args("new SearchRequest", args)?,
                ..SearchRequest::default()
            };
            Ok(search(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.count,
        Rc::new(move |args| {
            let request = CountRequest {
                indices: strings_args("new CountRequest", args)?,
                ..CountRequest::default()
            };
            Ok(count(&c, types, &p, request))
        }),
    );
    let (c, p) = (Rc::clone(client), Rc::clone(proto));
    registry.set_constructor(
        types.validate_query,
        Rc::new(move |args| {
            let request = ValidateQueryRequest {
                indices: strings_args("new ValidateQueryRequest", args)?,
                ..ValidateQueryRequest::default()
            };
            Ok(validate_query(&c, types, &p, request))
        }),
    );
}

// === Builder objects, one per request type ===

fn cluster_health(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: ClusterHealthRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.cluster_health];
    let mut obj = ScriptObject::with_class(types.cluster_health, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("waitForStatus", &this, move |recv, args| {
        e.borrow_mut().request_mut().wait_for_status = Some(string_arg("waitForStatus", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("timeout", &this, move |recv, args| {
        e.borrow_mut().request_mut().timeout = Some(string_arg("timeout", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("level", &this, move |recv, args| {
        e.borrow_mut().request_mut().level = Some(string_arg("level", args, 0)?);
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn cluster_state(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: ClusterStateRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.cluster_state];
    let mut obj = ScriptObject::with_class(types.cluster_state, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn create_index(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: CreateIndexRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.create_index];
    let mut obj = ScriptObject::with_class(types.create_index, proto);

    let e = Rc::clone(&exec);
    obj.define_method("index", &this, move |recv, args| {
        e.borrow_mut().request_mut().index = string_arg("index", args, 0)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("settings", &this, move |recv, args| {
        e.borrow_mut().request_mut().settings = Some(json_arg("settings", args, 0)?);
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn delete_index(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: DeleteIndexRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.delete_index];
    let mut obj = ScriptObject::with_class(types.delete_index, proto);

    let e = Rc::clone(&exec);
    obj.define_method("index", &this, move |recv, args| {
        e.borrow_mut().request_mut().index = string_arg("index", args, 0)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn refresh(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: RefreshRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.refresh];
    let mut obj = ScriptObject::with_class(types.refresh, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn index_document(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: IndexDocumentRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.index_doc];
    let mut obj = ScriptObject::with_class(types.index_doc, proto);

    let e = Rc::clone(&exec);
    obj.define_method("index", &this, move |recv, args| {
        e.borrow_mut().request_mut().index = string_arg("index", args, 0)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("id", &this, move |recv, args| {
        e.borrow_mut().request_mut().id = Some(string_arg("id", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("source", &this, move |recv, args| {
        e.borrow_mut().request_mut().source = Some(json_arg("source", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("refresh", &this, move |recv, args| {
        e.borrow_mut().request_mut().refresh = bool_arg_or("refresh", args, 0, true)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn get_document(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: GetDocumentRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.get_doc];
    let mut obj = ScriptObject::with_class(types.get_doc, proto);

    let e = Rc::clone(&exec);
    obj.define_method("index", &this, move |recv, args| {
        e.borrow_mut().request_mut().index = string_arg("index", args, 0)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("id", &this, move |recv, args| {
        e.borrow_mut().request_mut().id = string_arg("id", args, 0)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn delete_document(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: DeleteDocumentRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.delete_doc];
    let mut obj = ScriptObject::with_class(types.delete_doc, proto);

    let e = Rc::clone(&exec);
    obj.define_method("index", &this, move |recv, args| {
        e.borrow_mut().request_mut().index = string_arg("index", args, 0)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("id", &this, move |recv, args| {
        e.borrow_mut().request_mut().id = string_arg("id", args, 0)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("refresh", &this, move |recv, args| {
        e.borrow_mut().request_mut().refresh = bool_arg_or("refresh", args, 0, true)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn search(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: SearchRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.search];
    let mut obj = ScriptObject::with_class(types.search, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("source", &this, move |recv, args| {
        e.borrow_mut().request_mut().source = Some(json_arg("source", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("queryString", &this, move |recv, args| {
        e.borrow_mut().request_mut().query_string = Some(string_arg("queryString", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("size", &this, move |recv, args| {
        e.borrow_mut().request_mut().size = Some(u64_arg("size", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("from", &this, move |recv, args| {
        e.borrow_mut().request_mut().from = Some(u64_arg("from", args, 0)?);
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn count(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: CountRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.count];
    let mut obj = ScriptObject::with_class(types.count, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("query", &this, move |recv, args| {
        e.borrow_mut().request_mut().query = Some(json_arg("query", args, 0)?);
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}

fn validate_query(
    client: &Rc<dyn ClusterClient>,
    types: ApiTypes,
    proto: &ObjectRef,
    request: ValidateQueryRequest,
) -> ScriptValue {
    let exec = executor(client, request);
    let this = [types.validate_query];
    let mut obj = ScriptObject::with_class(types.validate_query, proto);

    let e = Rc::clone(&exec);
    obj.define_method("indices", &this, move |recv, args| {
        e.borrow_mut().request_mut().indices = strings_args("indices", args)?;
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("query", &this, move |recv, args| {
        e.borrow_mut().request_mut().query = Some(json_arg("query", args, 0)?);
        Ok(recv.clone())
    });
    let e = Rc::clone(&exec);
    obj.define_method("explain", &this, move |recv, args| {
        e.borrow_mut().request_mut().explain = bool_arg_or("explain", args, 0, true)?;
        Ok(recv.clone())
    });
    obj.define_method("execute", &[], move |_, args| {
        no_args("execute", args)?;
        run_execute(&exec)
    });
    ScriptValue::Object(obj.into_ref())
}
