//! AWS Signature Version 2 signing for the pub-sub control-plane client.
//!
//! The pub-sub extension of the gateway authenticates its REST surface with the
//! legacy SigV2 scheme (HMAC-SHA1). Requests never carry a body or a content
//! type, so the string to sign collapses to:
//!
//! ```text
//! METHOD\n\n\nDATE\nRESOURCE[?QUERY]
//! ```
//!
//! where the query string is only appended when the caller asks for parameter
//! signing (the S3-compatible notification surface).
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pubsub_auth::{Signer, SigningRequest};
//!
//! let signer = Signer::new("access", "secret");
//! let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
//! let signed = signer.sign(&SigningRequest::new("GET", "/topics/t1"), at);
//!
//! assert_eq!(signed.date, "Sun, 01 Mar 2026 12:00:00 +0000");
//! assert!(signed.authorization.starts_with("AWS access:"));
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Credential provider trait and in-memory implementation
//! - [`error`] - Verification error types
//! - [`sigv2`] - String-to-sign construction, signing and verification

pub mod credentials;
pub mod error;
pub mod sigv2;

pub use credentials::{CredentialProvider, StaticCredentialProvider};
pub use error::AuthError;
pub use sigv2::{
    QuerySigning, SignedHeaders, Signer, SigningRequest, VerifiedRequest, http_date, verify_sigv2,
};
