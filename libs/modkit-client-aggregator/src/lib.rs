//! Client Aggregator
//!
//! A [`ResourceClient`](modkit_resource_client::ResourceClient) facade that
//! sends each call to one of several backends. The backend is picked from
//! the target object's kind:
//!
//! 1. a route registered for the object's API group,
//! 2. else a route registered for its group-kind,
//! 3. else the default backend.
//!
//! Objects whose kind cannot be resolved go to the default backend.
//!
//! ## Usage
//!
//! ```ignore
//! use client_aggregator::AggregatingClient;
//! use modkit_resource_client::GroupKind;
//!
//! let client = AggregatingClient::builder(primary)
//!     .group("apps", apps_cluster)
//!     .group_kind(GroupKind::new("batch", "Job"), batch_cluster)
//!     .build();
//!
//! // Deployments go to `apps_cluster`, Jobs to `batch_cluster`,
//! // everything else to `primary`.
//! client.create(&ctx, &mut deployment, &CreateOptions::default()).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{ClientAggregatorConfig, GroupKindRouteConfig};
pub use domain::{
    AggregatingClient, AggregatingClientBuilder, AggregatorError, Backends, Route, StatusProxy,
    SubResourceProxy,
};
