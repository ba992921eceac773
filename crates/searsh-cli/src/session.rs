// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared session setup for the REPL and script execution.

use std::rc::Rc;

use miette::{IntoDiagnostic, Result};

use searsh_core::bridge::build_scope;
use searsh_core::client::{ClusterClient, HttpClusterClient};
use searsh_core::completion::CompletionEngine;
use searsh_core::eval::Interpreter;

use crate::config;

/// A connected shell session: transport, evaluator, and completion.
pub(crate) struct Session {
    /// Shared cluster transport.
    pub client: Rc<dyn ClusterClient>,
    /// Statement evaluator over the session scope.
    pub interpreter: Interpreter,
    /// Completion engine over the same scope.
    pub engine: CompletionEngine,
}

/// Opens a session against the resolved cluster URL.
///
/// The connection is lazy — the cluster is only contacted when a request
/// executes, so a session opens fine against a cluster that is down.
pub(crate) fn open(url_arg: Option<String>) -> Result<Session> {
    let url = config::resolve_url(url_arg);
    let timeout = config::resolve_timeout()?;
    let client = HttpClusterClient::connect(&url, timeout).into_diagnostic()?;
    let client: Rc<dyn ClusterClient> = Rc::new(client);

    let (bindings, registry) = build_scope(Rc::clone(&client));
    let interpreter = Interpreter::new(bindings, Rc::clone(&registry));
    let engine = CompletionEngine::new(registry);

    Ok(Session {
        client,
        interpreter,
        engine,
    })
}
