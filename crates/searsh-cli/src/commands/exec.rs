// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `searsh exec` command: evaluate a script file statement by
//! statement, printing each result.

use miette::{IntoDiagnostic, Result, WrapErr, miette};

use searsh_core::script::ScriptValue;

use super::repl::display::format_value;
use crate::session;

/// Runs a script file against the cluster.
pub fn run(path: &str, url_arg: Option<String>) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("could not read script file '{path}'"))?;

    let mut session = session::open(url_arg)?;
    let values = session
        .interpreter
        .eval_statements(&source)
        .map_err(|e| miette!("{e}"))?;

    for value in values {
        // Statements evaluated for their side effects print nothing.
        if !matches!(value, ScriptValue::Null) {
            println!("{}", format_value(&value));
        }
    }
    Ok(())
}
