// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The shell's command language: lexer, parser, and evaluator.
//!
//! This is deliberately *not* a general-purpose JavaScript: the grammar
//! covers identifier chains, method calls, `new` construction, literals
//! (strings, numbers, booleans, `null`, strict JSON objects), bracket
//! string indexing, and variable assignment — the exact surface needed to
//! drive request builders interactively.
//!
//! Evaluation and completion share one scope: assignments land in the
//! bindings object, whose prototype chain reaches the registered globals,
//! so a freshly assigned variable is immediately completable.

mod error;
mod lexer;
mod parser;
mod span;

pub use error::{EvalError, ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind, is_input_complete, lex};
pub use parser::{Expr, ExprKind, parse};
pub use span::Span;

use std::rc::Rc;

use ecow::EcoString;

use crate::script::{ApiRegistry, ObjectRef, ScriptValue};

/// Evaluates shell statements against a scope.
pub struct Interpreter {
    /// User bindings; prototype chain reaches the globals object.
    bindings: ObjectRef,
    /// API metadata for `new` construction.
    registry: Rc<ApiRegistry>,
}

impl Interpreter {
    /// Creates an interpreter over the given bindings object.
    #[must_use]
    pub fn new(bindings: ObjectRef, registry: Rc<ApiRegistry>) -> Self {
        Self { bindings, registry }
    }

    /// The bindings object (shared with the completion scope).
    #[must_use]
    pub fn bindings(&self) -> &ObjectRef {
        &self.bindings
    }

    /// The scope as a value, for completion requests.
    #[must_use]
    pub fn scope_value(&self) -> ScriptValue {
        ScriptValue::Object(Rc::clone(&self.bindings))
    }

    /// Removes all user bindings, keeping the globals intact.
    pub fn clear_bindings(&mut self) {
        self.bindings.borrow_mut().clear();
    }

    /// Parses and evaluates `source`, returning the last statement's value
    /// (or [`ScriptValue::Null`] for empty input).
    ///
    /// # Errors
    ///
    /// Returns the first parse or evaluation error; statements after a
    /// failed one are not evaluated.
    pub fn eval(&mut self, source: &str) -> Result<ScriptValue, EvalError> {
        Ok(self.eval_statements(source)?.pop().unwrap_or(ScriptValue::Null))
    }

    /// Parses and evaluates `source`, returning every statement's value in
    /// order. Used by script-file execution, where each result is shown.
    ///
    /// # Errors
    ///
    /// Returns the first parse or evaluation error; statements after a
    /// failed one are not evaluated.
    pub fn eval_statements(&mut self, source: &str) -> Result<Vec<ScriptValue>, EvalError> {
        let statements = parse(source)?;
        let mut values = Vec::with_capacity(statements.len());
        for statement in &statements {
            values.push(self.eval_expr(statement)?);
        }
        Ok(values)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<ScriptValue, EvalError> {
        match &expr.kind {
            ExprKind::Ident(name) => self.resolve(name, expr.span),
            ExprKind::Str(text) => Ok(ScriptValue::Str(text.clone())),
            ExprKind::Int(value) => Ok(ScriptValue::Int(*value)),
            ExprKind::Float(value) => Ok(ScriptValue::Float(*value)),
            ExprKind::Bool(value) => Ok(ScriptValue::Bool(*value)),
            ExprKind::Null => Ok(ScriptValue::Null),
            ExprKind::Json(value) => Ok(ScriptValue::Json(value.clone())),
            ExprKind::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.bindings.borrow_mut().set(name.clone(), value.clone());
                Ok(value)
            }
            ExprKind::Property { target, name } => {
                let receiver = self.eval_expr(target)?;
                receiver
                    .lookup(name)
                    .ok_or_else(|| EvalError::MissingProperty {
                        name: name.clone(),
                        kind: receiver.type_name(),
                        span: expr.span,
                    })
            }
            ExprKind::Index { target, key } => {
                let receiver = self.eval_expr(target)?;
                receiver
                    .lookup(key)
                    .ok_or_else(|| EvalError::MissingProperty {
                        name: key.clone(),
                        kind: receiver.type_name(),
                        span: expr.span,
                    })
            }
            ExprKind::Call { target, args } => self.eval_call(target, args, expr.span),
            ExprKind::New { class, args } => self.eval_new(class, args, expr.span),
        }
    }

    fn eval_call(
        &self,
        target: &Expr,
        args: &[Expr],
        span: Span,
    ) -> Result<ScriptValue, EvalError> {
        let arg_values = self.eval_args(args)?;
        match &target.kind {
            ExprKind::Property {
                target: receiver,
                name,
            } => {
                let receiver = self.eval_expr(receiver)?;
                match receiver.lookup(name) {
                    Some(ScriptValue::Method(method)) => {
                        Ok(method.invoke(&receiver, &arg_values)?)
                    }
                    Some(_) => Err(EvalError::NotCallable {
                        name: name.clone(),
                        span: target.span,
                    }),
                    None => Err(EvalError::MissingProperty {
                        name: name.clone(),
                        kind: receiver.type_name(),
                        span: target.span,
                    }),
                }
            }
            ExprKind::Ident(name) => match self.resolve(name, target.span)? {
                ScriptValue::Method(method) => {
                    Ok(method.invoke(&ScriptValue::Null, &arg_values)?)
                }
                ScriptValue::Constructor(_) => Err(EvalError::NotConstructible {
                    name: name.clone(),
                    span: target.span,
                }),
                _ => Err(EvalError::NotCallable {
                    name: name.clone(),
                    span: target.span,
                }),
            },
            _ => match self.eval_expr(target)? {
                ScriptValue::Method(method) => Ok(method.invoke(&ScriptValue::Null, &arg_values)?),
                _ => Err(EvalError::NotCallable {
                    name: EcoString::from("expression"),
                    span,
                }),
            },
        }
    }

    fn eval_new(
        &self,
        class: &EcoString,
        args: &[Expr],
        span: Span,
    ) -> Result<ScriptValue, EvalError> {
        let Some(id) = self.registry.find_type(class) else {
            return Err(EvalError::UnknownClass {
                name: class.clone(),
                span,
            });
        };
        let Some(constructor) = self.registry.constructor(id) else {
            return Err(EvalError::NotConstructible {
                name: class.clone(),
                span,
            });
        };
        let arg_values = self.eval_args(args)?;
        Ok(constructor(&arg_values)?)
    }

    fn eval_args(&self, args: &[Expr]) -> Result<Vec<ScriptValue>, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    fn resolve(&self, name: &str, span: Span) -> Result<ScriptValue, EvalError> {
        self.scope_value()
            .lookup(name)
            .ok_or_else(|| EvalError::Undefined {
                name: EcoString::from(name),
                span,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{ClassRef, ScriptObject};

    fn interpreter() -> Interpreter {
        let mut registry = ApiRegistry::new();
        let thing = registry.add_type("Thing");
        registry.set_constructor(thing, Rc::new(|args| {
            let label = match args.first() {
                Some(ScriptValue::Str(s)) => s.clone(),
                _ => EcoString::from("anonymous"),
            };
            let mut obj = ScriptObject::new();
            obj.set("label", ScriptValue::Str(label));
            Ok(ScriptValue::Object(obj.into_ref()))
        }));

        let mut globals = ScriptObject::new();
        globals.set(
            "Thing",
            ScriptValue::Constructor(ClassRef {
                id: thing,
                name: EcoString::from("Thing"),
            }),
        );
        globals.set("answer", ScriptValue::Int(41));
        let mut counter_obj = ScriptObject::new();
        counter_obj.define_method("next", &[], |_, _| Ok(ScriptValue::Int(7)));
        counter_obj.set(
            "data",
            ScriptValue::Json(serde_json::json!({"took": 3})),
        );
        globals.set("counter", ScriptValue::Object(counter_obj.into_ref()));
        let globals = globals.into_ref();

        let bindings = ScriptObject::with_prototype(&globals).into_ref();
        Interpreter::new(bindings, Rc::new(registry))
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        let mut interp = interpreter();
        assert!(matches!(interp.eval("42").unwrap(), ScriptValue::Int(42)));
        assert!(matches!(interp.eval("true").unwrap(), ScriptValue::Bool(true)));
        assert!(matches!(interp.eval("null").unwrap(), ScriptValue::Null));
    }

    #[test]
    fn assignment_round_trips_through_bindings() {
        let mut interp = interpreter();
        interp.eval("x = 42").unwrap();
        assert!(matches!(interp.eval("x").unwrap(), ScriptValue::Int(42)));
    }

    #[test]
    fn globals_resolve_through_the_prototype() {
        let mut interp = interpreter();
        assert!(matches!(interp.eval("answer").unwrap(), ScriptValue::Int(41)));
    }

    #[test]
    fn undefined_identifier_errors() {
        let mut interp = interpreter();
        assert!(matches!(
            interp.eval("nonsense"),
            Err(EvalError::Undefined { .. })
        ));
    }

    #[test]
    fn method_calls_dispatch_on_the_receiver() {
        let mut interp = interpreter();
        assert!(matches!(
            interp.eval("counter.next()").unwrap(),
            ScriptValue::Int(7)
        ));
    }

    #[test]
    fn calling_a_non_method_errors() {
        let mut interp = interpreter();
        assert!(matches!(
            interp.eval("counter.data()"),
            Err(EvalError::NotCallable { .. })
        ));
    }

    #[test]
    fn json_properties_resolve() {
        let mut interp = interpreter();
        let value = interp.eval("counter.data.took").unwrap();
        assert!(matches!(value, ScriptValue::Json(v) if v == serde_json::json!(3)));
    }

    #[test]
    fn bracket_index_resolves_like_property_access() {
        let mut interp = interpreter();
        let value = interp.eval("counter.data['took']").unwrap();
        assert!(matches!(value, ScriptValue::Json(v) if v == serde_json::json!(3)));
    }

    #[test]
    fn new_invokes_the_registered_constructor() {
        let mut interp = interpreter();
        let value = interp.eval("new Thing('demo')").unwrap();
        let ScriptValue::Object(obj) = value else {
            panic!("expected an object");
        };
        assert!(matches!(
            obj.borrow().get("label"),
            Some(ScriptValue::Str(s)) if s == "demo"
        ));
    }

    #[test]
    fn new_with_unknown_class_errors() {
        let mut interp = interpreter();
        assert!(matches!(
            interp.eval("new Bogus()"),
            Err(EvalError::UnknownClass { .. })
        ));
    }

    #[test]
    fn class_called_without_new_errors() {
        let mut interp = interpreter();
        assert!(matches!(
            interp.eval("Thing()"),
            Err(EvalError::NotConstructible { .. })
        ));
    }

    #[test]
    fn multiple_statements_return_the_last_value() {
        let mut interp = interpreter();
        let value = interp.eval("x = 1; y = 2; y").unwrap();
        assert!(matches!(value, ScriptValue::Int(2)));
    }

    #[test]
    fn clear_bindings_keeps_globals() {
        let mut interp = interpreter();
        interp.eval("x = 1").unwrap();
        interp.clear_bindings();
        assert!(matches!(interp.eval("x"), Err(EvalError::Undefined { .. })));
        assert!(interp.eval("answer").is_ok());
    }
}
