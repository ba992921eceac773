// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! REPL helper: tab completion, syntax highlighting, and input
//! validation.
//!
//! Implements rustyline's `Helper` trait, which bundles:
//! - `Completer` — shell commands client-side, everything else through
//!   the core completion engine over the live scope
//! - `Highlighter` — syntax highlighting using the shell lexer
//! - `Hinter` — inline hints (currently unused)
//! - `Validator` — input validation (currently unused)

use std::borrow::Cow;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use searsh_core::completion::CompletionEngine;
use searsh_core::eval::{TokenKind, lex};
use searsh_core::script::ScriptValue;

use super::color;

/// Shell commands available for client-side completion.
pub(super) const REPL_COMMANDS: &[&str] = &[
    ":help",
    ":h",
    ":?",
    ":exit",
    ":quit",
    ":q",
    ":clear",
    ":bindings",
    ":b",
    ":load",
    ":l",
    ":hosts",
];

/// REPL helper providing tab completion and syntax highlighting.
pub(super) struct ShellHelper {
    /// Scripting-aware completion engine.
    engine: CompletionEngine,
    /// The live scope; shared with the interpreter, so fresh bindings
    /// complete immediately.
    scope: ScriptValue,
}

impl ShellHelper {
    /// Creates a helper over the session's scope.
    pub(super) fn new(engine: CompletionEngine, scope: ScriptValue) -> Self {
        Self { engine, scope }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];

        // Shell command completion (starts with `:`, no arguments yet)
        if line_to_pos.starts_with(':') && !line_to_pos.contains(' ') {
            let candidates: Vec<Pair> = REPL_COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line_to_pos))
                .map(|cmd| Pair {
                    display: (*cmd).to_string(),
                    replacement: (*cmd).to_string(),
                })
                .collect();
            return Ok((0, candidates));
        }

        // Everything else goes through the scope-aware engine; it never
        // fails, it just returns no candidates.
        let completion = self.engine.complete(&self.scope, line, pos);
        let candidates: Vec<Pair> = completion
            .candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((completion.start, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !color::is_enabled() || line.is_empty() {
            return Cow::Borrowed(line);
        }

        // Shell commands get special highlighting
        if line.starts_with(':') {
            return Cow::Owned(format!("{}{}{}", color::BOLD_CYAN, line, color::RESET));
        }

        Cow::Owned(highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        if !color::is_enabled() {
            return Cow::Borrowed(prompt);
        }
        if prompt == "..> " {
            Cow::Owned(format!("{}{}{}", color::YELLOW, prompt, color::RESET))
        } else {
            Cow::Owned(format!("{}{}{}", color::GREEN, prompt, color::RESET))
        }
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        match kind {
            // Always re-highlight when input changes or on forced refresh
            CmdKind::Other | CmdKind::ForcedRefresh => true,
            // On cursor move, only re-highlight near brackets
            CmdKind::MoveCursor => {
                let bytes = line.as_bytes();
                if pos < bytes.len() {
                    matches!(bytes[pos], b'(' | b')' | b'[' | b']' | b'{' | b'}')
                } else if pos > 0 && pos <= bytes.len() {
                    matches!(bytes[pos - 1], b'(' | b')' | b'[' | b']' | b'{' | b'}')
                } else {
                    false
                }
            }
        }
    }
}

impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

/// Script keywords that get special highlighting.
const KEYWORDS: &[&str] = &["new", "true", "false", "null"];

/// Highlight a line of shell script using the lexer.
fn highlight_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len() * 2);
    let mut last_pos = 0usize;

    for token in lex(line) {
        let range = token.span().as_range();

        // Fill any gap (whitespace) between tokens
        if range.start > last_pos && range.start <= line.len() {
            result.push_str(&line[last_pos..range.start]);
        }
        let text = line.get(range.clone()).unwrap_or("");

        let chosen = match token.kind() {
            TokenKind::Str(_) => Some(color::GREEN),
            TokenKind::Int(_) | TokenKind::Float(_) => Some(color::YELLOW),
            TokenKind::Comment(_) => Some(color::GRAY),
            TokenKind::Error(_) => Some(color::BOLD_RED),
            TokenKind::Ident(name) => {
                let name: &str = name;
                if KEYWORDS.contains(&name) {
                    Some(color::BOLD_BLUE)
                } else if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                    Some(color::MAGENTA)
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(code) = chosen {
            result.push_str(code);
            result.push_str(text);
            result.push_str(color::RESET);
        } else {
            result.push_str(text);
        }
        last_pos = range.end;
    }

    // Append any remaining text after the last token
    if last_pos < line.len() {
        result.push_str(&line[last_pos..]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: get shell command completions for a prefix.
    fn command_completions(prefix: &str) -> Vec<String> {
        REPL_COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn command_completion_matches_prefix() {
        let candidates = command_completions(":he");
        assert!(candidates.contains(&":help".to_string()));
        assert!(candidates.iter().all(|c| c.starts_with(":he")));
    }

    #[test]
    fn command_completion_colon_only_lists_everything() {
        assert_eq!(command_completions(":").len(), REPL_COMMANDS.len());
    }

    #[test]
    fn command_completion_unknown_prefix_is_empty() {
        assert!(command_completions(":unknown").is_empty());
    }

    // === Highlighting tests ===

    #[test]
    fn highlight_empty_line() {
        assert_eq!(highlight_line(""), "");
    }

    #[test]
    fn highlight_integer_literal() {
        let result = highlight_line("42");
        assert!(result.contains(color::YELLOW));
        assert!(result.contains("42"));
        assert!(result.contains(color::RESET));
    }

    #[test]
    fn highlight_string_literal() {
        let result = highlight_line("'tweets'");
        assert!(result.contains(color::GREEN));
        assert!(result.contains("'tweets'"));
    }

    #[test]
    fn highlight_keyword_new() {
        let result = highlight_line("new SearchRequest()");
        assert!(result.contains(color::BOLD_BLUE));
        assert!(result.contains(color::MAGENTA)); // SearchRequest
    }

    #[test]
    fn highlight_comment() {
        let result = highlight_line("es.count() // note");
        assert!(result.contains(color::GRAY));
        assert!(result.contains("// note"));
    }

    #[test]
    fn highlight_regular_identifier_no_color() {
        let result = highlight_line("es");
        assert!(!result.contains(color::BOLD_BLUE));
        assert!(!result.contains(color::MAGENTA));
    }

    #[test]
    fn highlight_preserves_whitespace_between_tokens() {
        let result = highlight_line("x = 1");
        assert!(result.contains(" = "));
    }

    #[test]
    fn highlight_unterminated_string_in_red() {
        let result = highlight_line("es.index('tw");
        assert!(result.contains(color::BOLD_RED));
    }
}
