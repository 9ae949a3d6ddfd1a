//! Error types for SigV2 verification.
//!
//! Signing itself is pure computation and never fails; these variants only
//! surface on the verifying side.

/// Errors that can occur while verifying a SigV2-signed request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The `Authorization` header is missing from the request.
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// The `Authorization` header could not be parsed as `AWS <key>:<signature>`.
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// The `Date` header is missing or not valid ASCII.
    #[error("Missing Date header")]
    MissingDate,

    /// The access key ID was not found in the credential store.
    #[error("Access key not found: {0}")]
    AccessKeyNotFound(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,
}
