//! Construction errors for the client aggregator.
//!
//! Routing itself never fails: backend errors pass through untouched and
//! kind resolution failures fall back to the default backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregatorError {
    /// A route names a backend that was not supplied.
    #[error("unknown backend '{backend}' referenced by {route} route")]
    UnknownBackend { backend: String, route: String },

    #[error("invalid {route} route: {reason}")]
    InvalidRoute { route: String, reason: String },
}
