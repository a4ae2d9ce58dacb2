//! Configuration for the client aggregator.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Routing table.
///
/// Backends are referenced by name and resolved against a
/// [`Backends`](crate::Backends) set when the client is built.
///
/// ```yaml
/// default_backend: primary
/// groups:
///   apps: apps-cluster
/// group_kinds:
///   - group: batch
///     kind: Job
///     backend: batch-cluster
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientAggregatorConfig {
    /// Backend used when no route matches.
    pub default_backend: String,

    /// API group to backend name.
    pub groups: BTreeMap<String, String>,

    /// Group-kind routes. Later entries win over earlier ones with the same
    /// group and kind.
    pub group_kinds: Vec<GroupKindRouteConfig>,
}

impl Default for ClientAggregatorConfig {
    fn default() -> Self {
        Self {
            default_backend: "default".to_owned(),
            groups: BTreeMap::new(),
            group_kinds: Vec::new(),
        }
    }
}

/// A single group-kind route.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupKindRouteConfig {
    /// API group; empty for the core group.
    #[serde(default)]
    pub group: String,

    pub kind: String,

    /// Backend name.
    pub backend: String,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: ClientAggregatorConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg.default_backend, "default");
        assert!(cfg.groups.is_empty());
        assert!(cfg.group_kinds.is_empty());
    }

    #[test]
    fn full_config_deserializes() {
        let cfg: ClientAggregatorConfig = serde_json::from_value(json!({
            "default_backend": "primary",
            "groups": { "apps": "apps-cluster" },
            "group_kinds": [
                { "group": "batch", "kind": "Job", "backend": "batch-cluster" },
                { "kind": "Pod", "backend": "pods" }
            ]
        }))
        .unwrap();

        assert_eq!(cfg.default_backend, "primary");
        assert_eq!(cfg.groups["apps"], "apps-cluster");
        assert_eq!(cfg.group_kinds.len(), 2);
        assert_eq!(cfg.group_kinds[1].group, "");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ClientAggregatorConfig, _> =
            serde_json::from_value(json!({ "default": "primary" }));
        assert!(result.is_err());

        let result: Result<ClientAggregatorConfig, _> = serde_json::from_value(json!({
            "group_kinds": [{ "kind": "Job", "backend": "b", "version": "v1" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn group_kind_route_requires_kind_and_backend() {
        let result: Result<ClientAggregatorConfig, _> = serde_json::from_value(json!({
            "group_kinds": [{ "group": "batch" }]
        }));
        assert!(result.is_err());
    }
}
