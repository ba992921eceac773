// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! searsh core library.
//!
//! This crate contains everything behind the interactive shell:
//! - The scripting value model and API type registry (`script`)
//! - The shell command language: lexer, parser, evaluator (`eval`)
//! - The completion pipeline: backward tokenizer + resolution engine
//!   (`completion`)
//! - Request execution: validation, blocking submit, response conversion
//!   (`execute`, `document`, `client`)
//! - The concrete API operations and their script bindings (`requests`,
//!   `bridge`)
//!
//! The CLI crate wires these into a rustyline REPL; nothing here depends
//! on a terminal.

pub mod bridge;
pub mod client;
pub mod completion;
pub mod document;
pub mod eval;
pub mod execute;
pub mod requests;
pub mod script;

/// Re-export of commonly used types.
pub mod prelude {
    pub use crate::bridge::build_scope;
    pub use crate::client::{ClusterClient, HttpClusterClient};
    pub use crate::completion::{Completion, CompletionEngine};
    pub use crate::eval::{EvalError, Interpreter, is_input_complete};
    pub use crate::script::{ScriptValue, ApiRegistry};
}
