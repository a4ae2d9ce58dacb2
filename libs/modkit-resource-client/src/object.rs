//! Type-erased object model.
//!
//! Backends receive objects as trait objects and fill them in place, so every
//! payload type implements [`RuntimeObject`] plus either [`Object`] (a single
//! resource) or [`ObjectList`] (a collection). The [`crate::Scheme`] maps the
//! concrete Rust type behind a trait object to its [`GroupVersionKind`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::GroupVersionKind;

/// Access to the concrete type behind a trait object.
///
/// Implemented for every sized `'static` type; never implement it by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Any payload a resource client can read or write.
pub trait RuntimeObject: AsAny + fmt::Debug + Send + Sync + 'static {
    /// Kind carried by the payload itself.
    ///
    /// Unstructured payloads describe their own type; typed payloads return
    /// `None` and are resolved through the scheme's type table.
    fn embedded_kind(&self) -> Option<GroupVersionKind> {
        None
    }
}

impl dyn RuntimeObject {
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A single resource with metadata.
pub trait Object: RuntimeObject {
    fn meta(&self) -> &ObjectMeta;
    fn meta_mut(&mut self) -> &mut ObjectMeta;

    fn name(&self) -> &str {
        &self.meta().name
    }
}

impl dyn Object {
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A collection of resources.
pub trait ObjectList: RuntimeObject {
    fn list_meta(&self) -> &ListMeta;
    fn list_meta_mut(&mut self) -> &mut ListMeta;
}

/// Standard object metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_namespace(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }
}

/// Standard list metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// Unstructured resource that carries its own `apiVersion` and `kind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicObject {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl DynamicObject {
    #[must_use]
    pub fn new(gvk: &GroupVersionKind, metadata: ObjectMeta) -> Self {
        Self {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
            metadata,
            data: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}

fn embedded(api_version: &str, kind: &str) -> Option<GroupVersionKind> {
    if kind.is_empty() {
        return None;
    }
    Some(GroupVersionKind::from_api_version(api_version, kind))
}

impl RuntimeObject for DynamicObject {
    fn embedded_kind(&self) -> Option<GroupVersionKind> {
        embedded(&self.api_version, &self.kind)
    }
}

impl Object for DynamicObject {
    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Unstructured list; `kind` is the list kind, e.g. `DeploymentList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicList {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<DynamicObject>,
}

impl DynamicList {
    #[must_use]
    pub fn new(gvk: &GroupVersionKind) -> Self {
        Self {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
            ..Self::default()
        }
    }
}

impl RuntimeObject for DynamicList {
    fn embedded_kind(&self) -> Option<GroupVersionKind> {
        embedded(&self.api_version, &self.kind)
    }
}

impl ObjectList for DynamicList {
    fn list_meta(&self) -> &ListMeta {
        &self.metadata
    }

    fn list_meta_mut(&mut self) -> &mut ListMeta {
        &mut self.metadata
    }
}
