//! Type registry mapping Rust payload types to resource kinds.
//!
//! - Key = `TypeId` of the concrete payload type behind a trait object.
//! - Value = every [`GroupVersionKind`] the type was registered under.
//! - Self-describing payloads (see [`RuntimeObject::embedded_kind`]) bypass
//!   the table.
//!
//! The scheme is shared: backends and the callers that route between them
//! hold the same `Arc<Scheme>`, and registration goes through `&self`.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use crate::error::{KindList, SchemeError};
use crate::models::{GroupKind, GroupVersionKind, ResourceScope};
use crate::object::RuntimeObject;

#[derive(Default)]
struct SchemeState {
    kinds_by_type: HashMap<TypeId, Vec<GroupVersionKind>>,
    types_by_kind: HashMap<GroupVersionKind, TypeId>,
    scopes: HashMap<GroupKind, ResourceScope>,
}

/// Shared type registry.
#[derive(Default)]
pub struct Scheme {
    state: RwLock<SchemeState>,
}

impl Scheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `gvk`.
    ///
    /// A type may carry several kinds. Registering a kind that already
    /// belongs to another type moves it to `T`.
    pub fn register<T: RuntimeObject>(&self, gvk: GroupVersionKind) {
        let type_id = TypeId::of::<T>();
        let mut guard = self.state.write();
        let state = &mut *guard;

        if let Some(previous) = state.types_by_kind.insert(gvk.clone(), type_id)
            && previous != type_id
            && let Some(kinds) = state.kinds_by_type.get_mut(&previous)
        {
            kinds.retain(|k| k != &gvk);
        }

        let kinds = state.kinds_by_type.entry(type_id).or_default();
        if !kinds.contains(&gvk) {
            kinds.push(gvk);
        }
    }

    /// Register `T` under `gvk` and record the scope of its group-kind.
    pub fn register_scoped<T: RuntimeObject>(&self, gvk: GroupVersionKind, scope: ResourceScope) {
        self.set_scope(gvk.group_kind(), scope);
        self.register::<T>(gvk);
    }

    pub fn set_scope(&self, group_kind: GroupKind, scope: ResourceScope) {
        self.state.write().scopes.insert(group_kind, scope);
    }

    #[must_use]
    pub fn scope_of(&self, group_kind: &GroupKind) -> Option<ResourceScope> {
        self.state.read().scopes.get(group_kind).copied()
    }

    /// All kinds `obj` may be encoded as.
    ///
    /// # Errors
    ///
    /// `SchemeError::NotRegistered` if the payload is neither self-describing
    /// nor registered.
    pub fn object_kinds(
        &self,
        obj: &dyn RuntimeObject,
    ) -> Result<Vec<GroupVersionKind>, SchemeError> {
        if let Some(gvk) = obj.embedded_kind() {
            return Ok(vec![gvk]);
        }

        let type_id = obj.as_any().type_id();
        self.state
            .read()
            .kinds_by_type
            .get(&type_id)
            .filter(|kinds| !kinds.is_empty())
            .cloned()
            .ok_or(SchemeError::NotRegistered {
                type_name: obj.type_name(),
            })
    }

    /// The single kind of `obj`.
    ///
    /// # Errors
    ///
    /// `SchemeError::NotRegistered` for unknown types, `SchemeError::Ambiguous`
    /// when the type was registered under more than one kind.
    pub fn gvk_for_object(
        &self,
        obj: &dyn RuntimeObject,
    ) -> Result<GroupVersionKind, SchemeError> {
        let mut kinds = self.object_kinds(obj)?;
        if kinds.len() > 1 {
            return Err(SchemeError::Ambiguous {
                type_name: obj.type_name(),
                kinds: KindList(kinds),
            });
        }
        kinds.pop().ok_or(SchemeError::NotRegistered {
            type_name: obj.type_name(),
        })
    }

    /// Whether `obj` is namespace-scoped.
    ///
    /// # Errors
    ///
    /// Kind resolution errors, or `SchemeError::UnknownScope` when no scope
    /// was recorded for the object's group-kind.
    pub fn is_namespaced(&self, obj: &dyn RuntimeObject) -> Result<bool, SchemeError> {
        let group_kind = self.gvk_for_object(obj)?.group_kind();
        self.scope_of(&group_kind)
            .map(ResourceScope::is_namespaced)
            .ok_or(SchemeError::UnknownScope { group_kind })
    }

    #[must_use]
    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.state.read().types_by_kind.contains_key(gvk)
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn known_kinds(&self) -> Vec<GroupVersionKind> {
        let mut kinds: Vec<_> = self.state.read().types_by_kind.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().types_by_kind.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().types_by_kind.is_empty()
    }
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Scheme")
            .field("kinds", &state.types_by_kind.len())
            .field("scopes", &state.scopes.len())
            .finish()
    }
}
