#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures: typed payloads, a scheme, and a recording backend.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use futures::StreamExt;
use modkit_resource_client::{
    ClientContext, ClientError, CreateOptions, DeleteAllOfOptions, DeleteOptions, GetOptions,
    GroupKind, GroupVersionKind, ListMeta, ListOptions, Object, ObjectKey, ObjectList,
    ObjectMeta, Patch, PatchOptions, ResourceClient, ResourceScope, RestMapper, RestMapping,
    RuntimeObject, Scheme, SubResourceClient, SubResourceCreateOptions, SubResourceGetOptions,
    SubResourcePatchOptions, SubResourceReader, SubResourceUpdateOptions, SubResourceWriter,
    UpdateOptions, WatchEvent, WatchStream,
};

/// Label a backend stamps on every object it touches.
pub const SERVED_BY: &str = "served-by";

macro_rules! typed_object {
    ($name:ident) => {
        #[derive(Debug, Default, Clone)]
        pub struct $name {
            pub metadata: ObjectMeta,
        }

        impl $name {
            pub fn named(name: &str) -> Self {
                Self {
                    metadata: ObjectMeta::in_namespace("default", name),
                }
            }
        }

        impl RuntimeObject for $name {}

        impl Object for $name {
            fn meta(&self) -> &ObjectMeta {
                &self.metadata
            }

            fn meta_mut(&mut self) -> &mut ObjectMeta {
                &mut self.metadata
            }
        }
    };
}

macro_rules! typed_list {
    ($name:ident) => {
        #[derive(Debug, Default, Clone)]
        pub struct $name {
            pub metadata: ListMeta,
        }

        impl RuntimeObject for $name {}

        impl ObjectList for $name {
            fn list_meta(&self) -> &ListMeta {
                &self.metadata
            }

            fn list_meta_mut(&mut self) -> &mut ListMeta {
                &mut self.metadata
            }
        }
    };
}

typed_object!(Deployment);
typed_object!(Job);
typed_object!(CronJob);
typed_object!(Pod);
typed_object!(Scale);
typed_object!(Eviction);
typed_object!(Unregistered);
typed_object!(Ambiguous);

typed_list!(DeploymentList);
typed_list!(JobList);
typed_list!(PodList);
typed_list!(UnregisteredList);

/// Scheme shared by every backend in the tests.
pub fn scheme() -> Arc<Scheme> {
    let scheme = Scheme::new();
    scheme.register_scoped::<Deployment>(
        GroupVersionKind::new("apps", "v1", "Deployment"),
        ResourceScope::Namespaced,
    );
    scheme.register::<DeploymentList>(GroupVersionKind::new("apps", "v1", "DeploymentList"));
    scheme.register_scoped::<Job>(
        GroupVersionKind::new("batch", "v1", "Job"),
        ResourceScope::Namespaced,
    );
    scheme.register::<JobList>(GroupVersionKind::new("batch", "v1", "JobList"));
    scheme.register_scoped::<CronJob>(
        GroupVersionKind::new("batch", "v1", "CronJob"),
        ResourceScope::Namespaced,
    );
    scheme.register_scoped::<Pod>(
        GroupVersionKind::new("", "v1", "Pod"),
        ResourceScope::Namespaced,
    );
    scheme.register::<PodList>(GroupVersionKind::new("", "v1", "PodList"));
    scheme.register::<Scale>(GroupVersionKind::new("autoscaling", "v1", "Scale"));
    scheme.register::<Eviction>(GroupVersionKind::new("policy", "v1", "Eviction"));
    scheme.register::<Ambiguous>(GroupVersionKind::new("apps", "v1", "Ambiguous"));
    scheme.register::<Ambiguous>(GroupVersionKind::new("batch", "v1", "Ambiguous"));
    Arc::new(scheme)
}

/// What a backend saw of the caller's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeenContext {
    pub deadline: Option<Instant>,
    pub cancelled: bool,
}

/// Mapper that knows nothing.
pub struct NoMapping;

impl RestMapper for NoMapping {
    fn rest_mapping(
        &self,
        group_kind: &GroupKind,
        _versions: &[&str],
    ) -> Result<RestMapping, ClientError> {
        Err(ClientError::not_found("restmapping", group_kind.to_string()))
    }
}

/// Backend that records every call and stamps objects with its name.
pub struct RecordingClient {
    name: &'static str,
    scheme: Arc<Scheme>,
    reject_watch: bool,
    calls: Mutex<Vec<String>>,
    contexts: Mutex<Vec<SeenContext>>,
    mapper: NoMapping,
}

impl RecordingClient {
    pub fn new(name: &'static str, scheme: Arc<Scheme>) -> Arc<Self> {
        Arc::new(Self::build(name, scheme, false))
    }

    pub fn rejecting_watch(name: &'static str, scheme: Arc<Scheme>) -> Arc<Self> {
        Arc::new(Self::build(name, scheme, true))
    }

    fn build(name: &'static str, scheme: Arc<Scheme>, reject_watch: bool) -> Self {
        Self {
            name,
            scheme,
            reject_watch,
            calls: Mutex::new(Vec::new()),
            contexts: Mutex::new(Vec::new()),
            mapper: NoMapping,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contexts(&self) -> Vec<SeenContext> {
        self.contexts.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
        self.contexts.lock().unwrap().clear();
    }

    fn record(&self, ctx: Option<&ClientContext>, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
        if let Some(ctx) = ctx {
            self.contexts.lock().unwrap().push(SeenContext {
                deadline: ctx.deadline(),
                cancelled: ctx.is_cancelled(),
            });
        }
    }

    fn stamp(&self, obj: &mut dyn Object) {
        obj.meta_mut()
            .labels
            .insert(SERVED_BY.to_owned(), self.name.to_owned());
    }
}

/// Upcast helper so tests can hand the fake to the aggregator.
pub fn backend(client: &Arc<RecordingClient>) -> Arc<dyn ResourceClient> {
    client.clone()
}

/// Name of the backend that last stamped `obj`.
pub fn served_by(obj: &dyn Object) -> Option<&str> {
    obj.meta().labels.get(SERVED_BY).map(String::as_str)
}

#[async_trait]
impl ResourceClient for RecordingClient {
    async fn get(
        &self,
        ctx: &ClientContext,
        key: &ObjectKey,
        obj: &mut dyn Object,
        _opts: &GetOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "get");
        if key.name == "missing" {
            return Err(ClientError::not_found(self.name, key.to_string()));
        }
        obj.meta_mut().name.clone_from(&key.name);
        self.stamp(obj);
        Ok(())
    }

    async fn list(
        &self,
        ctx: &ClientContext,
        list: &mut dyn ObjectList,
        _opts: &ListOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "list");
        list.list_meta_mut().resource_version = Some(self.name.to_owned());
        Ok(())
    }

    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        _opts: &CreateOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "create");
        if obj.name() == "exists" {
            return Err(ClientError::AlreadyExists {
                resource: self.name.to_owned(),
                name: obj.name().to_owned(),
            });
        }
        self.stamp(obj);
        Ok(())
    }

    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        _opts: &UpdateOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "update");
        if obj.meta().resource_version.as_deref() == Some("stale") {
            return Err(ClientError::Conflict(format!("{} rejected stale write", self.name)));
        }
        self.stamp(obj);
        Ok(())
    }

    async fn delete(
        &self,
        ctx: &ClientContext,
        _obj: &dyn Object,
        _opts: &DeleteOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "delete");
        Ok(())
    }

    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        _opts: &PatchOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), format!("patch:{}", patch.content_type()));
        self.stamp(obj);
        Ok(())
    }

    async fn delete_all_of(
        &self,
        ctx: &ClientContext,
        _obj: &dyn Object,
        _opts: &DeleteAllOfOptions,
    ) -> Result<(), ClientError> {
        self.record(Some(ctx), "delete_all_of");
        Ok(())
    }

    async fn watch(
        &self,
        ctx: &ClientContext,
        _list: &dyn ObjectList,
        _opts: &ListOptions,
    ) -> Result<WatchStream, ClientError> {
        self.record(Some(ctx), "watch");
        if self.reject_watch {
            return Err(ClientError::unsupported(
                "watch",
                format!("{} cannot watch this list type", self.name),
            ));
        }
        let events = vec![WatchEvent::Bookmark(self.name.to_owned())];
        Ok(futures::stream::iter(events).boxed())
    }

    fn group_version_kind_for(
        &self,
        obj: &dyn RuntimeObject,
    ) -> Result<GroupVersionKind, ClientError> {
        self.record(None, "group_version_kind_for");
        Ok(self.scheme.gvk_for_object(obj)?)
    }

    fn is_object_namespaced(&self, obj: &dyn RuntimeObject) -> Result<bool, ClientError> {
        self.record(None, "is_object_namespaced");
        Ok(self.scheme.is_namespaced(obj)?)
    }

    fn scheme(&self) -> Arc<Scheme> {
        Arc::clone(&self.scheme)
    }

    fn rest_mapper(&self) -> &dyn RestMapper {
        &self.mapper
    }

    fn sub_resource(&self, sub_resource: &str) -> Box<dyn SubResourceClient + '_> {
        Box::new(RecordingSubResource {
            backend: self,
            prefix: format!("subresource:{sub_resource}"),
        })
    }

    fn status(&self) -> Box<dyn SubResourceWriter + '_> {
        Box::new(RecordingSubResource {
            backend: self,
            prefix: "status".to_owned(),
        })
    }
}

struct RecordingSubResource<'a> {
    backend: &'a RecordingClient,
    prefix: String,
}

#[async_trait]
impl SubResourceReader for RecordingSubResource<'_> {
    async fn get(
        &self,
        ctx: &ClientContext,
        _obj: &dyn Object,
        sub_resource: &mut dyn Object,
        _opts: &SubResourceGetOptions,
    ) -> Result<(), ClientError> {
        self.backend.record(Some(ctx), format!("{}:get", self.prefix));
        self.backend.stamp(sub_resource);
        Ok(())
    }
}

#[async_trait]
impl SubResourceWriter for RecordingSubResource<'_> {
    async fn create(
        &self,
        ctx: &ClientContext,
        _obj: &dyn Object,
        sub_resource: &mut dyn Object,
        _opts: &SubResourceCreateOptions,
    ) -> Result<(), ClientError> {
        self.backend.record(Some(ctx), format!("{}:create", self.prefix));
        self.backend.stamp(sub_resource);
        Ok(())
    }

    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        _opts: &SubResourceUpdateOptions,
    ) -> Result<(), ClientError> {
        self.backend.record(Some(ctx), format!("{}:update", self.prefix));
        self.backend.stamp(obj);
        Ok(())
    }

    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        _patch: &Patch,
        _opts: &SubResourcePatchOptions,
    ) -> Result<(), ClientError> {
        self.backend.record(Some(ctx), format!("{}:patch", self.prefix));
        self.backend.stamp(obj);
        Ok(())
    }
}
