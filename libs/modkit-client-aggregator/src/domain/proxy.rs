//! Sub-resource views of the aggregating client.
//!
//! Both proxies pick the backend from the primary object, never from the
//! sub-resource payload, then call the matching sub-resource operation on it.

use async_trait::async_trait;
use modkit_resource_client::{
    ClientContext, ClientError, Object, Patch, SubResourceCreateOptions, SubResourceGetOptions,
    SubResourcePatchOptions, SubResourceReader, SubResourceUpdateOptions, SubResourceWriter,
};

use super::client::AggregatingClient;

/// Access to one named sub-resource, e.g. `scale`.
#[derive(Debug)]
pub struct SubResourceProxy<'a> {
    client: &'a AggregatingClient,
    sub_resource: String,
}

impl<'a> SubResourceProxy<'a> {
    pub(crate) fn new(client: &'a AggregatingClient, sub_resource: &str) -> Self {
        Self {
            client,
            sub_resource: sub_resource.to_owned(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.sub_resource
    }
}

#[async_trait]
impl SubResourceReader for SubResourceProxy<'_> {
    async fn get(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        sub_resource: &mut dyn Object,
        opts: &SubResourceGetOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(obj)
            .sub_resource(&self.sub_resource)
            .get(ctx, obj, sub_resource, opts)
            .await
    }
}

#[async_trait]
impl SubResourceWriter for SubResourceProxy<'_> {
    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        sub_resource: &mut dyn Object,
        opts: &SubResourceCreateOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(obj)
            .sub_resource(&self.sub_resource)
            .create(ctx, obj, sub_resource, opts)
            .await
    }

    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &SubResourceUpdateOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(&*obj)
            .sub_resource(&self.sub_resource)
            .update(ctx, obj, opts)
            .await
    }

    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        opts: &SubResourcePatchOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(&*obj)
            .sub_resource(&self.sub_resource)
            .patch(ctx, obj, patch, opts)
            .await
    }
}

/// Writer for the status sub-resource.
#[derive(Debug)]
pub struct StatusProxy<'a> {
    client: &'a AggregatingClient,
}

impl<'a> StatusProxy<'a> {
    pub(crate) fn new(client: &'a AggregatingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubResourceWriter for StatusProxy<'_> {
    async fn create(
        &self,
        ctx: &ClientContext,
        obj: &dyn Object,
        sub_resource: &mut dyn Object,
        opts: &SubResourceCreateOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(obj)
            .status()
            .create(ctx, obj, sub_resource, opts)
            .await
    }

    async fn update(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        opts: &SubResourceUpdateOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(&*obj)
            .status()
            .update(ctx, obj, opts)
            .await
    }

    async fn patch(
        &self,
        ctx: &ClientContext,
        obj: &mut dyn Object,
        patch: &Patch,
        opts: &SubResourcePatchOptions,
    ) -> Result<(), ClientError> {
        self.client
            .client_for(&*obj)
            .status()
            .patch(ctx, obj, patch, opts)
            .await
    }
}
