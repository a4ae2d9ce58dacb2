//! Error types for resource access.

use std::fmt;

use thiserror::Error;

use crate::models::{GroupKind, GroupVersionKind};

/// Failure to map an object to its type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// The object's Rust type is not registered and the payload does not
    /// describe itself.
    #[error("no kind is registered for the type {type_name}")]
    NotRegistered { type_name: &'static str },

    /// The object's Rust type is registered under more than one kind.
    #[error("multiple kinds registered for the type {type_name}: {kinds}")]
    Ambiguous {
        type_name: &'static str,
        kinds: KindList,
    },

    /// No scope was recorded for the kind.
    #[error("scope of {group_kind} is unknown")]
    UnknownScope { group_kind: GroupKind },
}

/// Display helper for [`SchemeError::Ambiguous`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindList(pub Vec<GroupVersionKind>);

impl fmt::Display for KindList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, gvk) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{gvk}")?;
        }
        f.write_str("]")
    }
}

/// Errors returned by [`crate::ResourceClient`] implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The requested object does not exist.
    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: String, name: String },

    /// An object with the same name already exists.
    #[error("{resource} \"{name}\" already exists")]
    AlreadyExists { resource: String, name: String },

    /// Optimistic concurrency check failed.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The object failed validation.
    #[error("invalid: {0}")]
    Invalid(String),

    /// The caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The backend does not support the operation for this type.
    #[error("{operation} is not supported: {reason}")]
    Unsupported { operation: String, reason: String },

    /// The caller's deadline elapsed.
    #[error("deadline exceeded")]
    Timeout,

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// Transport error (network, connection, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The object could not be mapped to a kind.
    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    #[must_use]
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn unsupported(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
