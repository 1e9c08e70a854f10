//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures. Every variant is raised by
/// domain code or by the in-memory collaborators; none of them is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank company name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A capability was invoked on a value that does not provide it, e.g.
    /// `update` on the status flag returned by a previous update.
    #[error("undefined capability `{capability}` for {receiver}")]
    UnsupportedCapability {
        capability: &'static str,
        receiver: &'static str,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unsupported(capability: &'static str, receiver: &'static str) -> Self {
        Self::UnsupportedCapability {
            capability,
            receiver,
        }
    }

    pub fn is_unsupported_capability(&self) -> bool {
        matches!(self, Self::UnsupportedCapability { .. })
    }
}
