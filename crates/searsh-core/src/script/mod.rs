// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The shell's scripting value model.
//!
//! Everything the operator can touch from the shell — the `es` client
//! facade, request builders, user bindings, JSON responses — is a
//! [`ScriptValue`]. Live objects are property bags with an optional
//! prototype ([`ScriptObject`]); callable members are [`Method`]s carrying
//! the declared return types the completion engine walks once it leaves
//! live-object resolution.
//!
//! The completion engine never depends on a concrete object layout: it
//! sees values only through the [`PropertySource`] capability trait, so
//! the scripting runtime behind it can be swapped without touching the
//! resolver.

mod object;
mod registry;

pub use object::{Method, NativeFn, ObjectRef, ScriptObject};
pub use registry::{ApiRegistry, ConstructorFn, MemberKind, MemberSpec, TypeId};

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A reference to a constructible class in the [`ApiRegistry`].
///
/// Carries the registry id (for type-inference completion) and the class
/// name (for display and error messages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    /// Registry id of the class.
    pub id: TypeId,
    /// Class name as exposed to scripts, e.g. `SearchRequest`.
    pub name: EcoString,
}

/// A value in the shell's scripting scope.
///
/// Values are cheap to clone: objects and methods are reference-counted,
/// strings use [`EcoString`].
#[derive(Clone)]
pub enum ScriptValue {
    /// The absent value, also returned by statements with no result.
    Null,
    /// A boolean literal or flag.
    Bool(bool),
    /// An integer number.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(EcoString),
    /// Structured JSON data, e.g. a response document or a `{...}` literal.
    Json(serde_json::Value),
    /// A live scripting object (property bag with optional prototype).
    Object(ObjectRef),
    /// A callable member, possibly bound to a receiver at call time.
    Method(Rc<Method>),
    /// A class reference usable with `new`.
    Constructor(ClassRef),
}

impl ScriptValue {
    /// Returns a short name for the value's kind, used in error messages
    /// and by the universal `type` method.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Str(_) => "string",
            Self::Json(_) => "json",
            Self::Object(_) => "object",
            Self::Method(_) => "function",
            Self::Constructor(_) => "class",
        }
    }

    /// Looks a property up on this value, following the prototype chain.
    ///
    /// Returns `None` when neither the value itself nor any prototype
    /// defines the property.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ScriptValue> {
        if let Some(found) = self.property(name) {
            return Some(found);
        }
        let mut proto = self.prototype_object();
        // Prototype chains are shallow by construction; the depth guard
        // only protects against a hand-built cycle.
        for _ in 0..8 {
            let Some(current) = proto else { break };
            if let Some(found) = current.borrow().get(name) {
                return Some(found);
            }
            proto = current.borrow().prototype();
        }
        None
    }

    /// Renders the value as plain JSON for display, comparison, and the
    /// universal `toString`/`inspect` methods. Callables and classes are
    /// rendered as marker strings.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Self::Str(s) => serde_json::Value::String(s.to_string()),
            Self::Json(v) => v.clone(),
            Self::Object(obj) => {
                let obj = obj.borrow();
                let mut map = serde_json::Map::new();
                for key in obj.keys() {
                    if let Some(value) = obj.get(&key) {
                        map.insert(key.to_string(), value.to_json());
                    }
                }
                serde_json::Value::Object(map)
            }
            Self::Method(m) => serde_json::Value::String(format!("<function {}>", m.name())),
            Self::Constructor(class) => serde_json::Value::String(format!("<class {}>", class.name)),
        }
    }

    /// Compact single-line rendering, used by the universal `toString`.
    #[must_use]
    pub fn render_compact(&self) -> String {
        match self {
            Self::Str(s) => s.to_string(),
            other => other.to_json().to_string(),
        }
    }

    /// Stable hash of the compact rendering, used by the universal `hash`.
    #[must_use]
    pub fn render_hash(&self) -> i64 {
        let mut hasher = DefaultHasher::new();
        self.render_compact().hash(&mut hasher);
        // Wrap into the script-visible integer domain.
        hasher.finish() as i64
    }
}

impl fmt::Debug for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Float(x) => write!(f, "Float({x})"),
            Self::Str(s) => write!(f, "Str({s:?})"),
            Self::Json(v) => write!(f, "Json({v})"),
            Self::Object(obj) => {
                let keys = obj.borrow().keys();
                write!(f, "Object({keys:?})")
            }
            Self::Method(m) => write!(f, "Method({})", m.name()),
            Self::Constructor(class) => write!(f, "Constructor({})", class.name),
        }
    }
}

/// Capability interface over live scripting values.
///
/// The completion engine resolves identifier chains exclusively through
/// this trait: direct properties, enumerable keys, and the prototype
/// link. Adapters for other scripting runtimes only need to implement
/// these three operations.
pub trait PropertySource {
    /// Direct (own) property lookup; does not consult the prototype.
    fn property(&self, name: &str) -> Option<ScriptValue>;

    /// Enumerable own keys, in deterministic order.
    fn property_keys(&self) -> Vec<EcoString>;

    /// The prototype object, if any.
    fn prototype_object(&self) -> Option<ObjectRef>;
}

impl PropertySource for ScriptValue {
    fn property(&self, name: &str) -> Option<ScriptValue> {
        match self {
            Self::Object(obj) => obj.borrow().get(name),
            Self::Json(serde_json::Value::Object(map)) => {
                map.get(name).map(|v| Self::Json(v.clone()))
            }
            _ => None,
        }
    }

    fn property_keys(&self) -> Vec<EcoString> {
        match self {
            Self::Object(obj) => obj.borrow().keys(),
            Self::Json(serde_json::Value::Object(map)) => {
                map.keys().map(EcoString::from).collect()
            }
            _ => Vec::new(),
        }
    }

    fn prototype_object(&self) -> Option<ObjectRef> {
        match self {
            Self::Object(obj) => obj.borrow().prototype(),
            _ => None,
        }
    }
}

/// Errors raised by native methods invoked from scripts.
///
/// Validation and transport failures are formatted verbatim into
/// [`ScriptError::Execution`] so the operator sees the full message.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ScriptError {
    /// An argument had the wrong type.
    #[error("{method}: argument {index} must be {expected}")]
    BadArgument {
        /// Method that rejected the argument.
        method: EcoString,
        /// Zero-based argument position.
        index: usize,
        /// Human-readable expected type.
        expected: &'static str,
    },

    /// A required argument was not supplied.
    #[error("{method}: missing argument {index} ({expected})")]
    MissingArgument {
        /// Method that is missing the argument.
        method: EcoString,
        /// Zero-based argument position.
        index: usize,
        /// Human-readable expected type.
        expected: &'static str,
    },

    /// More arguments were supplied than the method takes.
    #[error("{method}: takes no arguments")]
    UnexpectedArguments {
        /// Method that was over-applied.
        method: EcoString,
    },

    /// A request execution failed; the message is surfaced verbatim.
    #[error("{0}")]
    Execution(String),
}
