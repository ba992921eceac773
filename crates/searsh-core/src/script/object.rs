// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Live scripting objects and callable members.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use ecow::EcoString;

use super::{ScriptError, ScriptValue, TypeId};

/// Shared handle to a [`ScriptObject`].
///
/// One operator thread drives both evaluation and completion, so
/// `Rc<RefCell<_>>` is sufficient.
pub type ObjectRef = Rc<RefCell<ScriptObject>>;

/// Implementation of a native method: receives the receiver value and the
/// evaluated call arguments.
pub type NativeFn = Box<dyn Fn(&ScriptValue, &[ScriptValue]) -> Result<ScriptValue, ScriptError>>;

/// A property bag with an optional prototype link.
///
/// Keys are stored in a `BTreeMap` so enumeration order is deterministic,
/// which keeps completion output and `inspect` rendering stable.
pub struct ScriptObject {
    /// Registry class of this object, when it mirrors an API type.
    class: Option<TypeId>,
    /// Own properties.
    entries: BTreeMap<EcoString, ScriptValue>,
    /// Prototype consulted by [`ScriptValue::lookup`] after own properties.
    prototype: Option<ObjectRef>,
}

impl ScriptObject {
    /// Creates an empty object with no prototype.
    #[must_use]
    pub fn new() -> Self {
        Self {
            class: None,
            entries: BTreeMap::new(),
            prototype: None,
        }
    }

    /// Creates an empty object whose lookups fall back to `prototype`.
    #[must_use]
    pub fn with_prototype(prototype: &ObjectRef) -> Self {
        Self {
            class: None,
            entries: BTreeMap::new(),
            prototype: Some(Rc::clone(prototype)),
        }
    }

    /// Creates an object tagged with a registry class.
    #[must_use]
    pub fn with_class(class: TypeId, prototype: &ObjectRef) -> Self {
        Self {
            class: Some(class),
            entries: BTreeMap::new(),
            prototype: Some(Rc::clone(prototype)),
        }
    }

    /// The registry class this object mirrors, if any.
    #[must_use]
    pub fn class(&self) -> Option<TypeId> {
        self.class
    }

    /// Direct property lookup; does not consult the prototype.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ScriptValue> {
        self.entries.get(name).cloned()
    }

    /// Sets an own property, replacing any previous value.
    pub fn set(&mut self, name: impl Into<EcoString>, value: ScriptValue) {
        self.entries.insert(name.into(), value);
    }

    /// Removes an own property, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<ScriptValue> {
        self.entries.remove(name)
    }

    /// Removes all own properties. The prototype is untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Own keys in deterministic (sorted) order.
    #[must_use]
    pub fn keys(&self) -> Vec<EcoString> {
        self.entries.keys().cloned().collect()
    }

    /// The prototype object, if any.
    #[must_use]
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.prototype.clone()
    }

    /// Defines a native method on this object.
    ///
    /// `return_types` is the declared-return-type metadata the completion
    /// engine switches on when it leaves live-object resolution.
    pub fn define_method<F>(&mut self, name: &str, return_types: &[TypeId], body: F)
    where
        F: Fn(&ScriptValue, &[ScriptValue]) -> Result<ScriptValue, ScriptError> + 'static,
    {
        let method = Method::new(name, return_types.to_vec(), Box::new(body));
        self.set(name, ScriptValue::Method(Rc::new(method)));
    }

    /// Wraps this object in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }
}

impl Default for ScriptObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScriptObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The prototype is omitted: printing it would recurse through the
        // shared universal prototype on every object.
        f.debug_struct("ScriptObject")
            .field("class", &self.class)
            .field("keys", &self.keys())
            .finish()
    }
}

/// A callable member of a scripting object.
///
/// Methods carry their declared return types so the completion engine can
/// keep resolving a chain after a call expression without evaluating it.
pub struct Method {
    /// Method name as exposed to scripts.
    name: EcoString,
    /// Declared return types across all overloads; empty when the result
    /// is terminal (e.g. `execute()` returning a response document).
    return_types: Vec<TypeId>,
    /// Native implementation.
    body: NativeFn,
}

impl Method {
    /// Creates a new native method.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, return_types: Vec<TypeId>, body: NativeFn) -> Self {
        Self {
            name: name.into(),
            return_types,
            body,
        }
    }

    /// The method name.
    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    /// Declared return types across all overloads.
    #[must_use]
    pub fn return_types(&self) -> &[TypeId] {
        &self.return_types
    }

    /// Invokes the method with the given receiver and arguments.
    ///
    /// # Errors
    ///
    /// Propagates whatever the native implementation raises.
    pub fn invoke(
        &self,
        receiver: &ScriptValue,
        args: &[ScriptValue],
    ) -> Result<ScriptValue, ScriptError> {
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("return_types", &self.return_types)
            .finish()
    }
}
