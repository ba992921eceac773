// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for script parsing and evaluation.
//!
//! Parse errors carry a [`Span`] for precise diagnostics; they integrate
//! with [`miette`] for error reporting. Evaluation errors name the value
//! or member involved the way the operator typed it.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::script::ScriptError;

use super::Span;

/// A parse error encountered while reading a statement.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ParseError {
    /// The kind of parse error.
    #[source]
    pub kind: ParseErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// A lexical error surfaced by the lexer.
    #[error("{0}")]
    Lex(EcoString),

    /// A token that does not fit the grammar at this position.
    #[error("unexpected {0}")]
    UnexpectedToken(EcoString),

    /// Input ended in the middle of an expression.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A specific token was required.
    #[error("expected {0}")]
    Expected(&'static str),

    /// A `{...}` literal that is not valid JSON.
    #[error("invalid JSON literal: {0}")]
    InvalidJson(String),
}

/// An error raised while evaluating a statement.
#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    /// The statement could not be parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// An identifier resolved to nothing in the scope chain.
    #[error("'{name}' is not defined")]
    Undefined {
        /// The unresolved name.
        name: EcoString,
        /// Where it appeared.
        #[label("unknown name")]
        span: Span,
    },

    /// A property access on a value that does not have it.
    #[error("{kind} value has no property '{name}'")]
    MissingProperty {
        /// The missing property.
        name: EcoString,
        /// Kind of the receiver value.
        kind: &'static str,
        /// Where the access appeared.
        #[label("no such property")]
        span: Span,
    },

    /// A call on something that is not a method.
    #[error("'{name}' is not a function")]
    NotCallable {
        /// The member that was called.
        name: EcoString,
        /// Where the call appeared.
        #[label("not callable")]
        span: Span,
    },

    /// `new` applied to an unknown class name.
    #[error("unknown class '{name}'")]
    UnknownClass {
        /// The class name.
        name: EcoString,
        /// Where it appeared.
        #[label("not a registered class")]
        span: Span,
    },

    /// `new` applied to a class without a constructor, or a class called
    /// without `new`.
    #[error("'{name}' cannot be constructed")]
    NotConstructible {
        /// The class name.
        name: EcoString,
        /// Where it appeared.
        #[label("no constructor")]
        span: Span,
    },

    /// A native method raised an error (argument checks, execution
    /// failures surfaced verbatim).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Script(#[from] ScriptError),
}
