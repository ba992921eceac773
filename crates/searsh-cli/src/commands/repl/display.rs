// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! REPL display formatting, help text, and history.

use std::fs;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use searsh_core::script::ScriptValue;

use super::color;
use crate::paths::searsh_dir;

/// Return the path to the shell history file, creating the parent
/// directory if needed.
pub(crate) fn history_path() -> Result<PathBuf> {
    let dir = searsh_dir()?;
    fs::create_dir_all(&dir).into_diagnostic()?;
    Ok(dir.join("history"))
}

/// Format a script value for display with optional coloring.
pub(crate) fn format_value(value: &ScriptValue) -> String {
    match value {
        ScriptValue::Str(text) => color::paint(color::GREEN, text),
        ScriptValue::Method(method) => {
            color::paint(color::CYAN, &format!("<function {}>", method.name()))
        }
        ScriptValue::Constructor(class) => {
            color::paint(color::CYAN, &format!("<class {}>", class.name))
        }
        other => format_json(&other.to_json(), 0),
    }
}

/// Format an error message for display.
pub(crate) fn format_error(message: &str) -> String {
    if color::is_enabled() {
        format!("{}{}Error:{} {message}", color::BOLD, color::RED, color::RESET)
    } else {
        format!("Error: {message}")
    }
}

/// Pretty-print JSON with per-type coloring, two-space indentation.
fn format_json(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match value {
        Value::Null => color::paint(color::BOLD_BLUE, "null"),
        Value::Bool(flag) => color::paint(color::BOLD_BLUE, &flag.to_string()),
        Value::Number(number) => color::paint(color::YELLOW, &number.to_string()),
        Value::String(text) => color::paint(color::GREEN, &format!("\"{}\"", escape(text))),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let inner: Vec<String> = items
                .iter()
                .map(|item| format!("{pad}  {}", format_json(item, indent + 1)))
                .collect();
            format!("[\n{}\n{pad}]", inner.join(",\n"))
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let inner: Vec<String> = map
                .iter()
                .map(|(key, item)| {
                    format!("{pad}  \"{key}\": {}", format_json(item, indent + 1))
                })
                .collect();
            format!("{{\n{}\n{pad}}}", inner.join(",\n"))
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Print the help message.
pub(crate) fn print_help() {
    println!("searsh commands:");
    println!();
    println!("  :help, :h       Show this help message");
    println!("  :exit, :q       Exit the shell");
    println!("  :clear          Clear all variable bindings");
    println!("  :bindings, :b   Show current variable bindings");
    println!("  :load <path>    Evaluate a script file in this session");
    println!("  :hosts          Show the connected cluster URL");
    println!();
    println!("Expression examples:");
    println!("  es.admin().cluster().health().execute()");
    println!("  es.index().index('tweets').id('1').source({{\"user\": \"kimchy\"}}).execute()");
    println!("  es.search().indices('tweets').queryString('user:kimchy').execute()");
    println!("  x = es.count().execute()   // bind a response document");
    println!("  x.count                    // and drill into it");
    println!();
    println!("Multi-line input:");
    println!("  Statements with unclosed parens, brackets, braces, or strings");
    println!("  continue on the next line (..> prompt). Ctrl+C cancels.");
    println!();
    println!("Tab completion walks the scope: try `es.` or `new Sea`.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::Ordering;

    fn without_color<T>(test: impl FnOnce() -> T) -> T {
        let prev = color::COLOR_ENABLED.load(Ordering::Relaxed);
        color::COLOR_ENABLED.store(false, Ordering::Relaxed);
        let result = test();
        color::COLOR_ENABLED.store(prev, Ordering::Relaxed);
        result
    }

    #[test]
    #[serial(color)]
    fn format_string_value() {
        without_color(|| {
            let value = ScriptValue::Str("hello".into());
            assert_eq!(format_value(&value), "hello");
        });
    }

    #[test]
    #[serial(color)]
    fn format_number_and_bool() {
        without_color(|| {
            assert_eq!(format_value(&ScriptValue::Int(42)), "42");
            assert_eq!(format_value(&ScriptValue::Bool(true)), "true");
        });
    }

    #[test]
    #[serial(color)]
    fn format_json_object_is_indented() {
        without_color(|| {
            let value = ScriptValue::Json(serde_json::json!({"ok": true, "count": 3}));
            let rendered = format_value(&value);
            assert!(rendered.contains("\"ok\": true"));
            assert!(rendered.contains("\"count\": 3"));
            assert!(rendered.starts_with("{\n"));
        });
    }

    #[test]
    #[serial(color)]
    fn format_empty_containers_stay_inline() {
        without_color(|| {
            assert_eq!(format_value(&ScriptValue::Json(serde_json::json!({}))), "{}");
            assert_eq!(format_value(&ScriptValue::Json(serde_json::json!([]))), "[]");
        });
    }

    #[test]
    #[serial(color)]
    fn format_error_without_color() {
        without_color(|| {
            assert_eq!(format_error("boom"), "Error: boom");
        });
    }

    #[test]
    #[serial(color)]
    fn strings_inside_json_are_escaped() {
        without_color(|| {
            let value = ScriptValue::Json(serde_json::json!({"q": "say \"hi\""}));
            let rendered = format_value(&value);
            assert!(rendered.contains(r#"say \"hi\""#));
        });
    }
}
