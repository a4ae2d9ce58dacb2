//! Routing facade and its sub-resource views.

pub mod builder;
pub mod client;
pub mod error;
pub mod proxy;

pub use builder::{AggregatingClientBuilder, Backends};
pub use client::{AggregatingClient, Route};
pub use error::AggregatorError;
pub use proxy::{StatusProxy, SubResourceProxy};
