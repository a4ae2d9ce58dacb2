//! Resource Client SDK
//!
//! The contract shared by resource access backends and the components that
//! route between them:
//!
//! - [`ResourceClient`] - full access capability set (CRUD, patch, bulk
//!   delete, watch, type introspection, sub-resources)
//! - [`SubResourceClient`], [`SubResourceWriter`] - sub-resource access
//! - [`Object`], [`ObjectList`], [`DynamicObject`] - type-erased payloads
//! - [`Scheme`] - shared type registry mapping payload types to kinds
//! - [`ClientError`], [`SchemeError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use modkit_resource_client::{ClientContext, GetOptions, ObjectKey, ResourceClient};
//!
//! let client: Arc<dyn ResourceClient> = build_backend();
//! let mut deployment = Deployment::default();
//! client
//!     .get(
//!         &ClientContext::new(),
//!         &ObjectKey::namespaced("default", "web"),
//!         &mut deployment,
//!         &GetOptions::default(),
//!     )
//!     .await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod object;
pub mod options;
pub mod scheme;

pub use api::{
    RestMapper, RestMapping, ResourceClient, STATUS_SUBRESOURCE, SubResourceClient,
    SubResourceReader, SubResourceWriter, WatchEvent, WatchStream,
};
pub use error::{ClientError, KindList, SchemeError};
pub use models::{
    GroupKind, GroupVersionKind, GroupVersionResource, ObjectKey, ResourceScope,
};
pub use object::{
    AsAny, DynamicList, DynamicObject, ListMeta, Object, ObjectList, ObjectMeta, RuntimeObject,
};
pub use options::{
    ClientContext, CreateOptions, DeleteAllOfOptions, DeleteOptions, GetOptions, ListOptions,
    Patch, PatchOptions, PatchType, Preconditions, PropagationPolicy, SubResourceCreateOptions,
    SubResourceGetOptions, SubResourcePatchOptions, SubResourceUpdateOptions, UpdateOptions,
};
pub use scheme::Scheme;
