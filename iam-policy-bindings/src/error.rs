//! Error types for policy access and decoding.

use thiserror::Error;

/// Errors raised by [`Policy`](crate::Policy) operations.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The policy declares a schema version this type does not model.
    ///
    /// Role-keyed access is only defined for version 1 policies; anything
    /// newer may carry conditional bindings and must be handled through
    /// the raw binding list.
    #[error("unsupported policy version {0}: migration to bindings-based access required")]
    UnsupportedVersion(i32),

    /// `delete` was called for a role with no binding.
    #[error("role not found: {0}")]
    RoleNotFound(String),

    /// The resource document did not have the expected structure.
    #[error("failed to decode policy resource: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PolicyError {
    /// Create a role-not-found error
    pub fn role_not_found(role: impl Into<String>) -> Self {
        Self::RoleNotFound(role.into())
    }
}

/// Result alias for policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;
