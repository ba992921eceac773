// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The interactive shell: read a statement, evaluate it against the
//! cluster, print the response document.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌───────────────────────────────┐
//! │  searsh REPL     │        │  searsh-core                  │
//! │  (this module)   │───────▶│  Interpreter ── bridge ── es  │
//! │                  │  eval  │       │                   │   │
//! │  rustyline       │        │  CompletionEngine   HTTP client│
//! └──────────────────┘        └───────────────┬───────────────┘
//!                                             │ blocking JSON/HTTP
//!                                      Elasticsearch cluster
//! ```
//!
//! Evaluation and completion run on the single operator thread; the only
//! blocking point is the request round trip inside `execute()`.

pub(crate) mod color;
pub(crate) mod display;
mod helper;

use miette::{IntoDiagnostic, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use serde::Deserialize;
use tracing::warn;

use searsh_core::client::{ApiRequest, HttpMethod};
use searsh_core::eval::is_input_complete;
use searsh_core::script::ScriptValue;

use crate::session::{self, Session};
use self::helper::ShellHelper;

/// The cluster's root-endpoint banner, used for the welcome line.
#[derive(Debug, Deserialize)]
struct ClusterInfo {
    /// Cluster name.
    cluster_name: Option<String>,
    /// Server version block.
    version: Option<VersionInfo>,
}

/// Version block of the root-endpoint banner.
#[derive(Debug, Deserialize)]
struct VersionInfo {
    /// Version number string, e.g. `8.13.0`.
    number: Option<String>,
}

/// Runs the interactive shell.
pub fn run(url_arg: Option<String>) -> Result<()> {
    let Session {
        client,
        mut interpreter,
        engine,
    } = session::open(url_arg)?;

    println!("searsh v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for available commands, :exit to quit.");
    println!();

    // Probe the cluster so the operator knows what they are talking to.
    // The shell stays usable when the cluster is down; requests will
    // simply fail until it is back.
    match client.submit(&ApiRequest::new(HttpMethod::Get, "/")) {
        Ok(response) => {
            let info: ClusterInfo = serde_json::from_value(response.body).unwrap_or(ClusterInfo {
                cluster_name: None,
                version: None,
            });
            let name = info.cluster_name.as_deref().unwrap_or("unnamed cluster");
            match info.version.and_then(|v| v.number) {
                Some(number) => println!(
                    "Connected to {name} (Elasticsearch {number}) at {}.",
                    client.endpoint()
                ),
                None => println!("Connected to {name} at {}.", client.endpoint()),
            }
        }
        Err(e) => {
            warn!("cluster probe failed: {e}");
            println!(
                "Could not reach {}; requests will fail until the cluster is up.",
                client.endpoint()
            );
        }
    }
    println!();

    // Set up the line editor with completion and highlighting.
    let mut rl: Editor<ShellHelper, FileHistory> = Editor::new().into_diagnostic()?;
    rl.set_helper(Some(ShellHelper::new(engine, interpreter.scope_value())));

    let history_file = display::history_path()?;
    let _ = rl.load_history(&history_file);

    let mut line_buffer: Vec<String> = Vec::new();
    loop {
        let prompt = if line_buffer.is_empty() { "es> " } else { "..> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() && line_buffer.is_empty() {
                    continue;
                }

                // Commands are only recognized when not accumulating a
                // multi-line statement.
                if line_buffer.is_empty() {
                    let _ = rl.add_history_entry(line);

                    match line {
                        ":exit" | ":quit" | ":q" => {
                            println!("Goodbye!");
                            break;
                        }
                        ":help" | ":h" | ":?" => {
                            display::print_help();
                            continue;
                        }
                        ":clear" => {
                            interpreter.clear_bindings();
                            println!("Bindings cleared.");
                            continue;
                        }
                        ":bindings" | ":b" => {
                            print_bindings(&interpreter);
                            continue;
                        }
                        ":hosts" => {
                            println!("{}", client.endpoint());
                            continue;
                        }
                        _ if line.starts_with(":load ") || line.starts_with(":l ") => {
                            let path = line
                                .strip_prefix(":load ")
                                .or_else(|| line.strip_prefix(":l "))
                                .unwrap_or_default()
                                .trim();
                            if path.is_empty() {
                                eprintln!("Usage: :load <path>");
                            } else {
                                load_file(&mut interpreter, path);
                            }
                            continue;
                        }
                        _ => {}
                    }

                    // Detect common commands typed without the ':' prefix.
                    let first_word = line.split_whitespace().next().unwrap_or("");
                    if let Some(suggestion) = match first_word {
                        "help" => Some(":help"),
                        "exit" | "quit" => Some(":exit"),
                        "clear" => Some(":clear"),
                        "bindings" => Some(":bindings"),
                        "load" => Some(":load"),
                        "hosts" => Some(":hosts"),
                        _ => None,
                    } {
                        eprintln!("Hint: did you mean `{suggestion}`? Shell commands start with `:`");
                        continue;
                    }
                }

                // Accumulate input for multi-line statement detection
                line_buffer.push(line.to_string());
                let accumulated = line_buffer.join("\n");
                if !is_input_complete(&accumulated) {
                    continue;
                }
                if line_buffer.len() > 1 {
                    let _ = rl.add_history_entry(&accumulated);
                }
                line_buffer.clear();

                match interpreter.eval(&accumulated) {
                    // A null result means "nothing to show" (e.g. a
                    // response conversion that was degraded); stay quiet.
                    Ok(ScriptValue::Null) => {}
                    Ok(value) => println!("{}", display::format_value(&value)),
                    Err(e) => eprintln!("{}", display::format_error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C cancels multi-line input, otherwise just a newline
                if !line_buffer.is_empty() {
                    line_buffer.clear();
                    eprintln!("Cancelled");
                }
                println!();
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(&history_file);
    Ok(())
}

/// Show current bindings, one per line.
fn print_bindings(interpreter: &searsh_core::eval::Interpreter) {
    let bindings = interpreter.bindings().borrow();
    let keys = bindings.keys();
    if keys.is_empty() {
        println!("No bindings.");
        return;
    }
    for key in keys {
        if let Some(value) = bindings.get(&key) {
            println!("  {key} = {}", display::format_value(&value));
        }
    }
}

/// Evaluate a script file inside the current session.
fn load_file(interpreter: &mut searsh_core::eval::Interpreter, path: &str) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", display::format_error(&format!("could not read '{path}': {e}")));
            return;
        }
    };
    match interpreter.eval_statements(&source) {
        Ok(values) => {
            for value in values {
                if !matches!(value, ScriptValue::Null) {
                    println!("{}", display::format_value(&value));
                }
            }
            println!("Loaded {path}");
        }
        Err(e) => eprintln!("{}", display::format_error(&e.to_string())),
    }
}
