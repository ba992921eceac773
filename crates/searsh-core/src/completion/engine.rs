// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Context-aware completion over the scripting scope.
//!
//! The engine resolves all but the last identifier of the access chain
//! under the cursor. Resolution starts in *live-object mode*, walking
//! actual scope values through [`PropertySource`]; it switches to
//! *type-inference mode* — walking [`ApiRegistry`] metadata instead —
//! the moment it meets a `new` constructor reference or a method with
//! declared return types. Once in type-inference mode it never returns
//! to live objects.
//!
//! Completion is best-effort by design: every failure path degrades to
//! zero candidates (anchored at the failing identifier so the caller can
//! position the replacement), and nothing here can interrupt typing.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use ecow::EcoString;

use crate::script::{ApiRegistry, MemberKind, PropertySource, ScriptValue, TypeId};

use super::{Identifier, tokenize};

/// Universal prototype members hidden from completion by default.
///
/// The three most commonly useful universal methods (`toString`,
/// `inspect`, `keys`) are deliberately kept visible; the rest only add
/// noise to every candidate list.
pub const DEFAULT_EXCLUDED: &[&str] = &["equals", "hash", "type"];

/// The result of one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Buffer offset where the replacement span begins.
    pub start: usize,
    /// Sorted, deduplicated candidate strings.
    pub candidates: Vec<String>,
}

impl Completion {
    fn none_at(start: usize) -> Self {
        Self {
            start,
            candidates: Vec::new(),
        }
    }
}

/// Resolution state while walking the chain.
enum Resolution {
    /// Walking live scope values.
    Live(ScriptValue),
    /// Walking registry metadata for a set of candidate types.
    Types(Vec<TypeId>),
}

/// Scripting-aware completion engine.
pub struct CompletionEngine {
    registry: Rc<ApiRegistry>,
    excluded: HashSet<EcoString>,
}

impl CompletionEngine {
    /// Creates an engine with the default deny-list.
    #[must_use]
    pub fn new(registry: Rc<ApiRegistry>) -> Self {
        Self::with_excluded(registry, DEFAULT_EXCLUDED.iter().map(|s| EcoString::from(*s)))
    }

    /// Creates an engine with an explicit set of excluded member names.
    #[must_use]
    pub fn with_excluded(
        registry: Rc<ApiRegistry>,
        excluded: impl IntoIterator<Item = EcoString>,
    ) -> Self {
        Self {
            registry,
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Completes the partial identifier at `cursor` against `scope`.
    ///
    /// Never fails: internal resolution problems yield zero candidates,
    /// positioned at the failing identifier (or the cursor when nothing
    /// could be tokenized at all).
    #[must_use]
    pub fn complete(&self, scope: &ScriptValue, buffer: &str, cursor: usize) -> Completion {
        let cursor = cursor.min(buffer.len());
        let chain = tokenize(buffer, cursor);
        self.resolve_chain(scope, &chain)
            .unwrap_or_else(|| Completion::none_at(cursor))
    }

    fn resolve_chain(&self, scope: &ScriptValue, chain: &[Identifier]) -> Option<Completion> {
        let (last, walk) = chain.split_last()?;

        let mut state = Resolution::Live(scope.clone());
        let mut pending_new = false;

        for ident in walk {
            if ident.is_keyword_new() {
                pending_new = true;
                continue;
            }
            state = match state {
                Resolution::Live(value) => {
                    let Some(resolved) = value.lookup(ident.name()) else {
                        return Some(Completion::none_at(ident.start()));
                    };
                    match resolved {
                        ScriptValue::Constructor(class) if pending_new => {
                            pending_new = false;
                            Resolution::Types(vec![class.id])
                        }
                        ScriptValue::Method(method) if !method.return_types().is_empty() => {
                            Resolution::Types(method.return_types().to_vec())
                        }
                        value @ (ScriptValue::Object(_) | ScriptValue::Json(_)) => {
                            Resolution::Live(value)
                        }
                        _ => return Some(Completion::none_at(ident.start())),
                    }
                }
                Resolution::Types(types) => {
                    let mut next: Vec<TypeId> = Vec::new();
                    for id in &types {
                        for rt in self.registry.return_types_of(*id, ident.name()) {
                            if !next.contains(&rt) {
                                next.push(rt);
                            }
                        }
                    }
                    if next.is_empty() {
                        return Some(Completion::none_at(ident.start()));
                    }
                    Resolution::Types(next)
                }
            };
        }

        let mut candidates = BTreeSet::new();
        match state {
            Resolution::Live(value) => self.live_candidates(&value, last.name(), &mut candidates),
            Resolution::Types(types) => self.type_candidates(&types, last.name(), &mut candidates),
        }
        Some(Completion {
            start: last.start(),
            candidates: candidates.into_iter().collect(),
        })
    }

    /// Live-object candidates: own keys plus prototype-chain keys matching
    /// the partial text. Callables get a trailing `(` marker; class
    /// references do not.
    fn live_candidates(&self, value: &ScriptValue, partial: &str, out: &mut BTreeSet<String>) {
        let mut sources = vec![value.clone()];
        let mut proto = value.prototype_object();
        for _ in 0..8 {
            let Some(current) = proto else { break };
            proto = current.borrow().prototype();
            sources.push(ScriptValue::Object(current));
        }

        for source in &sources {
            for key in source.property_keys() {
                if !key.starts_with(partial) || self.excluded.contains(&key) {
                    continue;
                }
                // An enumerated key without a value is the runtime's
                // "no such property" sentinel; skip it.
                let Some(resolved) = source.property(&key) else {
                    continue;
                };
                match resolved {
                    ScriptValue::Method(_) => {
                        out.insert(format!("{key}("));
                    }
                    _ => {
                        out.insert(key.to_string());
                    }
                }
            }
        }
    }

    /// Type-inference candidates: methods (with a `()` marker) and fields
    /// of every type in the candidate set, unioned and deduplicated.
    fn type_candidates(&self, types: &[TypeId], partial: &str, out: &mut BTreeSet<String>) {
        for id in types {
            for member in self.registry.members(*id) {
                if !member.name().starts_with(partial) || self.excluded.contains(member.name()) {
                    continue;
                }
                match member.kind() {
                    MemberKind::Method => {
                        out.insert(format!("{}()", member.name()));
                    }
                    MemberKind::Field => {
                        out.insert(member.name().to_string());
                    }
                }
            }
        }
    }
}
