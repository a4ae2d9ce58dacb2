//! Resource access contract.
//!
//! [`ResourceClient`] is the full capability set a backend offers: CRUD,
//! patch, bulk delete, watch, type introspection and sub-resource access.
//! Callers hold backends as `Arc<dyn ResourceClient>` and never depend on a
//! concrete implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ClientError;
use crate::models::{GroupKind, GroupVersionKind, GroupVersionResource, ObjectKey, ResourceScope};
use crate::object::{Object, ObjectList, RuntimeObject};
use crate::options::{
    ClientContext, CreateOptions, DeleteAllOfOptions, DeleteOptions, GetOptions, ListOptions,
    Patch, PatchOptions, SubResourceCreateOptions, SubResourceGetOptions, SubResourcePatchOptions,
    SubResourceUpdateOptions, UpdateOptions,
};
use crate::scheme::Scheme;

/// Name of the conventional status sub-resource.
pub const STATUS_SUBRESOURCE: &str = "status";

/// Change notification delivered on a [`WatchStream`].
#[derive(Debug)]
pub enum WatchEvent {
    Added(Box<dyn Object>),
    Modified(Box<dyn Object>),
    Deleted(Box<dyn Object>),
    /// Progress marker carrying only a resource version.
    Bookmark(String),
    Error(ClientError),
}

/// Live event stream returned by [`ResourceClient::watch`].
///
/// Owned by the caller; dropping it stops the watch.
pub type WatchStream = BoxStream<'static, WatchEvent>;

/// Result of a REST mapping lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestMapping {
    pub resource: GroupVersionResource,
    pub gvk: GroupVersionKind,
    pub scope: ResourceScope,
}

/// Kind to REST endpoint mapping.
pub trait RestMapper: Send + Sync {
    /// Resolve `group_kind` at the first matching version in `versions`,
    /// or the preferred version when `versions` is empty.
    ///
    /// # Errors
    ///
    /// `ClientError::NotFound` when the kind is unknown to the mapper.
    fn rest_mapping(
        &self,
        group_kind: &GroupKind,
        versions: &[&str],
    ) -> Result<RestMapping, ClientError>;
}

/// Full resource access capability set.
///
/// Every data-access call takes the caller's [`ClientContext`], the target
/// object or list, and typed options. Read operations fill the target in
/// place.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetch the object at `key` into `obj`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the object does not exist; transport errors.
    async fn get(
        &self,
        ctx: &ClientContext,
        key: &ObjectKey,
        obj: &mut dyn Object,
        opts: &GetOptions,
    ) -> Result<(), ClientError>;

    /// Fill `list` with the matching objects.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn list(
        &self,
        ctx: &ClientContext,
        list: &mut dyn ObjectList,
        opts: &ListOptions,
    ) -> Result<(), ClientError>;

    /// Create `obj`; the stored state is written back into it.
    ///
    /// # Errors
    ///
    /// `AlreadyExists`, `Invalid`, transport errors.
    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &CreateOptions,
    ) -> Result<(), ClientError>;

    /// Replace `obj` entirely.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Conflict`, `Invalid`, transport errors.
    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &UpdateOptions,
    ) -> Result<(), ClientError>;

    /// Delete `obj`.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Conflict` on failed preconditions, transport errors.
    async fn delete(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        opts: &DeleteOptions,
    ) -> Result<(), ClientError>;

    /// Apply `patch` to `obj`; the patched state is written back.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Conflict`, `Invalid`, transport errors.
    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        opts: &PatchOptions,
    ) -> Result<(), ClientError>;

    /// Delete every object of `obj`'s type matching the selection.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn delete_all_of(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        opts: &DeleteAllOfOptions,
    ) -> Result<(), ClientError>;

    /// Open a watch for objects of `list`'s item type.
    ///
    /// # Errors
    ///
    /// Returned when the backend cannot establish the stream, e.g. the list
    /// type is not watchable.
    async fn watch(
        &self,
        ctx: &ClientContext,
        list: &dyn ObjectList,
        opts: &ListOptions,
    ) -> Result<WatchStream, ClientError>;

    /// Kind of `obj` as known to this client.
    ///
    /// # Errors
    ///
    /// `ClientError::Scheme` when the type is unknown or ambiguous.
    fn group_version_kind_for(
        &self,
        obj: &dyn RuntimeObject,
    ) -> Result<GroupVersionKind, ClientError>;

    /// Whether `obj` is namespace-scoped.
    ///
    /// # Errors
    ///
    /// `ClientError::Scheme` when the type or its scope is unknown.
    fn is_object_namespaced(&self, obj: &dyn RuntimeObject) -> Result<bool, ClientError>;

    /// Type registry used by this client.
    fn scheme(&self) -> Arc<Scheme>;

    /// REST mapping used by this client.
    fn rest_mapper(&self) -> &dyn RestMapper;

    /// Client for the named sub-resource, e.g. `scale` or `eviction`.
    fn sub_resource(&self, sub_resource: &str) -> Box<dyn SubResourceClient + '_>;

    /// Writer for the status sub-resource.
    fn status(&self) -> Box<dyn SubResourceWriter + '_>;
}

/// Read side of a sub-resource.
#[async_trait]
pub trait SubResourceReader: Send + Sync {
    /// Read the sub-resource of `obj` into `sub_resource`.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn get(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        sub_resource: &mut dyn Object,
        opts: &SubResourceGetOptions,
    ) -> Result<(), ClientError>;
}

/// Write side of a sub-resource.
#[async_trait]
pub trait SubResourceWriter: Send + Sync {
    /// Create `sub_resource` under `obj`, e.g. an eviction for a pod.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        sub_resource: &mut dyn Object,
        opts: &SubResourceCreateOptions,
    ) -> Result<(), ClientError>;

    /// Update the sub-resource of `obj`.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &SubResourceUpdateOptions,
    ) -> Result<(), ClientError>;

    /// Patch the sub-resource of `obj`.
    ///
    /// # Errors
    ///
    /// Backend-specific errors.
    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        opts: &SubResourcePatchOptions,
    ) -> Result<(), ClientError>;
}

/// Read and write access to a sub-resource.
pub trait SubResourceClient: SubResourceReader + SubResourceWriter {}

impl<T: SubResourceReader + SubResourceWriter + ?Sized> SubResourceClient for T {}
