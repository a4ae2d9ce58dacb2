//! Construction of aggregating clients from code or configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use modkit_resource_client::{GroupKind, ResourceClient, Scheme};
use tracing::info;

use super::client::AggregatingClient;
use super::error::AggregatorError;
use crate::config::ClientAggregatorConfig;

/// Builder for an [`AggregatingClient`] whose routes are fixed at `build()`.
pub struct AggregatingClientBuilder {
    default_client: Arc<dyn ResourceClient>,
    scheme: Option<Arc<Scheme>>,
    groups: Vec<(String, Arc<dyn ResourceClient>)>,
    group_kinds: Vec<(GroupKind, Arc<dyn ResourceClient>)>,
}

impl AggregatingClientBuilder {
    #[must_use]
    pub fn new(default_client: Arc<dyn ResourceClient>) -> Self {
        Self {
            default_client,
            scheme: None,
            groups: Vec::new(),
            group_kinds: Vec::new(),
        }
    }

    /// Resolve kinds with `scheme` instead of the default backend's scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: Arc<Scheme>) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Route `group` to `client`. The last call for a group wins.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>, client: Arc<dyn ResourceClient>) -> Self {
        self.groups.push((group.into(), client));
        self
    }

    /// Route `group_kind` to `client`. The last call for a group-kind wins.
    #[must_use]
    pub fn group_kind(mut self, group_kind: GroupKind, client: Arc<dyn ResourceClient>) -> Self {
        self.group_kinds.push((group_kind, client));
        self
    }

    #[must_use]
    pub fn build(self) -> AggregatingClient {
        let mut client = match self.scheme {
            Some(scheme) => AggregatingClient::with_scheme(self.default_client, scheme),
            None => AggregatingClient::new(self.default_client),
        };
        for (group, backend) in self.groups {
            client.add_group(group, backend);
        }
        for (group_kind, backend) in self.group_kinds {
            client.add_group_kind(group_kind, backend);
        }
        client
    }
}

impl fmt::Debug for AggregatingClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatingClientBuilder")
            .field("scheme", &self.scheme)
            .field("groups", &self.groups.iter().map(|(g, _)| g).collect::<Vec<_>>())
            .field(
                "group_kinds",
                &self.group_kinds.iter().map(|(gk, _)| gk).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Named backends that configuration routes refer to.
#[derive(Clone, Default)]
pub struct Backends {
    by_name: HashMap<String, Arc<dyn ResourceClient>>,
}

impl Backends {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a backend, returning the one previously registered under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        client: Arc<dyn ResourceClient>,
    ) -> Option<Arc<dyn ResourceClient>> {
        self.by_name.insert(name.into(), client)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, client: Arc<dyn ResourceClient>) -> Self {
        self.insert(name, client);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ResourceClient>> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn require(&self, name: &str, route: &str) -> Result<Arc<dyn ResourceClient>, AggregatorError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AggregatorError::UnknownBackend {
                backend: name.to_owned(),
                route: route.to_owned(),
            })
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.by_name.keys().collect();
        names.sort();
        f.debug_struct("Backends").field("names", &names).finish()
    }
}

impl AggregatingClient {
    /// Build a client from a routing table, resolving backend names against
    /// `backends`.
    ///
    /// # Errors
    ///
    /// - `AggregatorError::UnknownBackend` if a route names a missing backend
    /// - `AggregatorError::InvalidRoute` if a group-kind route has an empty kind
    pub fn from_config(
        config: &ClientAggregatorConfig,
        backends: &Backends,
    ) -> Result<Self, AggregatorError> {
        let mut builder =
            Self::builder(backends.require(&config.default_backend, "default")?);

        for (group, backend) in &config.groups {
            let route = format!("group '{group}'");
            builder = builder.group(group.clone(), backends.require(backend, &route)?);
        }

        for entry in &config.group_kinds {
            let group_kind = GroupKind::new(entry.group.clone(), entry.kind.clone());
            let route = format!("group-kind '{group_kind}'");
            if entry.kind.is_empty() {
                return Err(AggregatorError::InvalidRoute {
                    route,
                    reason: "kind must not be empty".to_owned(),
                });
            }
            builder = builder.group_kind(group_kind, backends.require(&entry.backend, &route)?);
        }

        info!(
            default_backend = %config.default_backend,
            groups = config.groups.len(),
            group_kinds = config.group_kinds.len(),
            "client aggregator configured"
        );
        Ok(builder.build())
    }
}
