//! Error taxonomy for authentication and authorization.

use thiserror::Error;

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failure modes of the credential service and the authorization gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented.
    #[error("missing credential")]
    MissingCredential,

    /// The credential is malformed, expired, or its signature does not
    /// verify. Deliberately one variant: the boundary reports all of these
    /// identically.
    #[error("invalid credential")]
    InvalidCredential,

    /// The caller is authenticated but does not hold the required role.
    #[error("requires role {required}")]
    Forbidden {
        /// Role the operation demands.
        required: String,
    },

    /// The role directory could not be consulted.
    #[error("role directory error: {0}")]
    Directory(String),

    /// Credential signing failed.
    #[error("credential signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Returns `true` if the failure maps to HTTP 401 (no usable identity).
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidCredential)
    }
}
