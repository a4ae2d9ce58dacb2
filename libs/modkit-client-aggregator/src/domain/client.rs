//! Aggregating client.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use modkit_resource_client::{
    ClientContext, ClientError, CreateOptions, DeleteAllOfOptions, DeleteOptions, GetOptions,
    GroupKind, GroupVersionKind, ListOptions, Object, ObjectKey, ObjectList, Patch, PatchOptions,
    ResourceClient, RestMapper, RuntimeObject, Scheme, SubResourceClient, SubResourceWriter,
    UpdateOptions, WatchStream,
};
use tracing::{debug, trace};

use super::builder::AggregatingClientBuilder;
use super::proxy::{StatusProxy, SubResourceProxy};

/// Rule that selected the backend for an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A route registered for the object's API group.
    Group(String),
    /// A route registered for the object's group-kind.
    GroupKind(GroupKind),
    /// No route matched.
    Default,
    /// The object's kind could not be resolved; the default backend serves
    /// the call.
    Unresolved,
}

/// Resource client that routes every call to one of several backends.
///
/// Resolution order for an object:
/// 1. kind lookup through the shared [`Scheme`]; on failure, the default
///    backend (the error is not surfaced),
/// 2. a route registered for the object's group,
/// 3. a route registered for its group-kind,
/// 4. the default backend.
///
/// A group route always beats a group-kind route for the same object.
///
/// Routes are registered through `&mut self` (or the
/// [`AggregatingClientBuilder`]), so they are fixed once the client is
/// shared.
pub struct AggregatingClient {
    default_client: Arc<dyn ResourceClient>,
    scheme: Arc<Scheme>,
    per_group: HashMap<String, Arc<dyn ResourceClient>>,
    per_group_kind: HashMap<GroupKind, Arc<dyn ResourceClient>>,
}

impl AggregatingClient {
    /// Create a client resolving kinds with the default backend's scheme.
    ///
    /// Every backend must recognize the same scheme; registering a type only
    /// on another backend's scheme has no effect on routing.
    #[must_use]
    pub fn new(default_client: Arc<dyn ResourceClient>) -> Self {
        let scheme = default_client.scheme();
        Self::with_scheme(default_client, scheme)
    }

    /// Create a client resolving kinds with an explicitly shared scheme.
    #[must_use]
    pub fn with_scheme(default_client: Arc<dyn ResourceClient>, scheme: Arc<Scheme>) -> Self {
        Self {
            default_client,
            scheme,
            per_group: HashMap::new(),
            per_group_kind: HashMap::new(),
        }
    }

    #[must_use]
    pub fn builder(default_client: Arc<dyn ResourceClient>) -> AggregatingClientBuilder {
        AggregatingClientBuilder::new(default_client)
    }

    /// Route every kind of `group` to `client`. Replaces an earlier route
    /// for the same group.
    pub fn add_group(&mut self, group: impl Into<String>, client: Arc<dyn ResourceClient>) {
        let group = group.into();
        debug!(group = %group, "registered group route");
        self.per_group.insert(group, client);
    }

    /// Route `group_kind` to `client`. Replaces an earlier route for the
    /// same group-kind. A group route for the same group takes precedence.
    pub fn add_group_kind(&mut self, group_kind: GroupKind, client: Arc<dyn ResourceClient>) {
        debug!(group_kind = %group_kind, "registered group-kind route");
        self.per_group_kind.insert(group_kind, client);
    }

    /// Which rule serves `obj`.
    #[must_use]
    pub fn route_for(&self, obj: &dyn RuntimeObject) -> Route {
        self.resolve(obj).0
    }

    pub(crate) fn client_for(&self, obj: &dyn RuntimeObject) -> &dyn ResourceClient {
        self.resolve(obj).1
    }

    fn resolve(&self, obj: &dyn RuntimeObject) -> (Route, &dyn ResourceClient) {
        let GroupVersionKind { group, kind, .. } = match self.scheme.gvk_for_object(obj) {
            Ok(gvk) => gvk,
            Err(error) => {
                debug!(%error, "kind resolution failed, routing to default backend");
                return (Route::Unresolved, self.default_client.as_ref());
            }
        };

        if let Some(client) = self.per_group.get(&group) {
            trace!(group = %group, kind = %kind, "routing by group");
            return (Route::Group(group), client.as_ref());
        }

        let group_kind = GroupKind { group, kind };
        if let Some(client) = self.per_group_kind.get(&group_kind) {
            trace!(group_kind = %group_kind, "routing by group-kind");
            return (Route::GroupKind(group_kind), client.as_ref());
        }

        trace!(group_kind = %group_kind, "routing to default backend");
        (Route::Default, self.default_client.as_ref())
    }
}

impl fmt::Debug for AggregatingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups: Vec<&String> = self.per_group.keys().collect();
        groups.sort();
        let mut group_kinds: Vec<&GroupKind> = self.per_group_kind.keys().collect();
        group_kinds.sort();

        f.debug_struct("AggregatingClient")
            .field("scheme", &self.scheme)
            .field("groups", &groups)
            .field("group_kinds", &group_kinds)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ResourceClient for AggregatingClient {
    async fn get(
        &self,
        ctx: &ClientContext,
        key: &ObjectKey,
        obj: &mut dyn Object,
        opts: &GetOptions,
    ) -> Result<(), ClientError> {
        self.client_for(&*obj).get(ctx, key, obj, opts).await
    }

    async fn list(
        &self,
        ctx: &ClientContext,
        list: &mut dyn ObjectList,
        opts: &ListOptions,
    ) -> Result<(), ClientError> {
        self.client_for(&*list).list(ctx, list, opts).await
    }

    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &CreateOptions,
    ) -> Result<(), ClientError> {
        self.client_for(&*obj).create(ctx, obj, opts).await
    }

    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &UpdateOptions,
    ) -> Result<(), ClientError> {
        self.client_for(&*obj).update(ctx, obj, opts).await
    }

    async fn delete(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        opts: &DeleteOptions,
    ) -> Result<(), ClientError> {
        self.client_for(obj).delete(ctx, obj, opts).await
    }

    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        opts: &PatchOptions,
    ) -> Result<(), ClientError> {
        self.client_for(&*obj).patch(ctx, obj, patch, opts).await
    }

    async fn delete_all_of(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        opts: &DeleteAllOfOptions,
    ) -> Result<(), ClientError> {
        self.client_for(obj).delete_all_of(ctx, obj, opts).await
    }

    async fn watch(
        &self,
        ctx: &ClientContext,
        list: &dyn ObjectList,
        opts: &ListOptions,
    ) -> Result<WatchStream, ClientError> {
        self.client_for(list).watch(ctx, list, opts).await
    }

    fn group_version_kind_for(
        &self,
        obj: &dyn RuntimeObject,
    ) -> Result<GroupVersionKind, ClientError> {
        self.client_for(obj).group_version_kind_for(obj)
    }

    fn is_object_namespaced(&self, obj: &dyn RuntimeObject) -> Result<bool, ClientError> {
        self.client_for(obj).is_object_namespaced(obj)
    }

    fn scheme(&self) -> Arc<Scheme> {
        Arc::clone(&self.scheme)
    }

    /// # Panics
    ///
    /// Always. REST mapping is not available through the aggregator; asking
    /// for it is a programming error.
    fn rest_mapper(&self) -> &dyn RestMapper {
        panic!("AggregatingClient does not provide a REST mapper")
    }

    fn sub_resource(&self, sub_resource: &str) -> Box<dyn SubResourceClient + '_> {
        Box::new(SubResourceProxy::new(self, sub_resource))
    }

    fn status(&self) -> Box<dyn SubResourceWriter + '_> {
        Box::new(StatusProxy::new(self))
    }
}
