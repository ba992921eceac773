// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Static API type metadata.
//!
//! The registry is the Rust-native stand-in for runtime reflection: every
//! script-visible API class is described once (methods, fields, declared
//! return types, optional constructor), and the completion engine walks
//! these descriptions in type-inference mode instead of live objects.
//!
//! The registry is built during scope construction and frozen behind an
//! `Rc` afterwards; nothing mutates it at completion time.

use std::fmt;
use std::rc::Rc;

use ecow::EcoString;

use super::{ScriptError, ScriptValue};

/// Opaque id of a type registered in an [`ApiRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

/// Constructor implementation for a registered class.
pub type ConstructorFn = Rc<dyn Fn(&[ScriptValue]) -> Result<ScriptValue, ScriptError>>;

/// Whether a member is invocable or a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// An invocable member, rendered with trailing parens by completion.
    Method,
    /// A plain field, rendered bare.
    Field,
}

/// A described member of a registered type.
#[derive(Debug, Clone)]
pub struct MemberSpec {
    name: EcoString,
    kind: MemberKind,
    return_types: Vec<TypeId>,
}

impl MemberSpec {
    /// The member name.
    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    /// Whether the member is a method or a field.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Declared return types (empty for fields and terminal methods).
    #[must_use]
    pub fn return_types(&self) -> &[TypeId] {
        &self.return_types
    }
}

struct TypeSpec {
    name: EcoString,
    members: Vec<MemberSpec>,
    constructor: Option<ConstructorFn>,
}

/// Registry of script-visible API types.
pub struct ApiRegistry {
    types: Vec<TypeSpec>,
}

impl ApiRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Registers a new type and returns its id.
    pub fn add_type(&mut self, name: &str) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(TypeSpec {
            name: EcoString::from(name),
            members: Vec::new(),
            constructor: None,
        });
        id
    }

    /// Adds a method member to `owner` with the given declared return types.
    pub fn add_method(&mut self, owner: TypeId, name: &str, return_types: &[TypeId]) {
        if let Some(spec) = self.types.get_mut(owner.0 as usize) {
            spec.members.push(MemberSpec {
                name: EcoString::from(name),
                kind: MemberKind::Method,
                return_types: return_types.to_vec(),
            });
        }
    }

    /// Adds a field member to `owner`.
    pub fn add_field(&mut self, owner: TypeId, name: &str) {
        if let Some(spec) = self.types.get_mut(owner.0 as usize) {
            spec.members.push(MemberSpec {
                name: EcoString::from(name),
                kind: MemberKind::Field,
                return_types: Vec::new(),
            });
        }
    }

    /// Installs a constructor for `owner`, making it usable with `new`.
    pub fn set_constructor(&mut self, owner: TypeId, constructor: ConstructorFn) {
        if let Some(spec) = self.types.get_mut(owner.0 as usize) {
            spec.constructor = Some(constructor);
        }
    }

    /// The display name of a type.
    #[must_use]
    pub fn type_name(&self, id: TypeId) -> &str {
        self.types.get(id.0 as usize).map_or("<unknown>", |t| t.name.as_str())
    }

    /// Finds a type by its exact name.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(|idx| TypeId(u32::try_from(idx).unwrap_or(u32::MAX)))
    }

    /// All described members of a type.
    #[must_use]
    pub fn members(&self, id: TypeId) -> &[MemberSpec] {
        self.types.get(id.0 as usize).map_or(&[], |t| t.members.as_slice())
    }

    /// Union of the declared return types of all methods named exactly
    /// `method` (case-sensitive) on `id`. Empty when no method matches.
    #[must_use]
    pub fn return_types_of(&self, id: TypeId, method: &str) -> Vec<TypeId> {
        let mut out = Vec::new();
        for member in self.members(id) {
            if member.kind == MemberKind::Method && member.name == method {
                for rt in &member.return_types {
                    if !out.contains(rt) {
                        out.push(*rt);
                    }
                }
            }
        }
        out
    }

    /// The constructor of a type, if it is constructible.
    #[must_use]
    pub fn constructor(&self, id: TypeId) -> Option<&ConstructorFn> {
        self.types.get(id.0 as usize).and_then(|t| t.constructor.as_ref())
    }
}

impl Default for ApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(|t| t.name.as_str()).collect();
        f.debug_struct("ApiRegistry").field("types", &names).finish()
    }
}
