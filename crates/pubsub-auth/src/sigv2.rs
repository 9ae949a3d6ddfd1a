//! AWS Signature Version 2 signing and verification.
//!
//! The `Authorization` header has the format:
//!
//! ```text
//! AWS <AWSAccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                Resource [+ "?" + Query]
//! ```
//!
//! The control-plane requests never carry a body, so `Content-MD5` and
//! `Content-Type` are always empty.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::credentials::CredentialProvider;
use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;

/// `Date` header format. The zone suffix is always the literal `+0000`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Format a timestamp the way the gateway expects in the `Date` header.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
/// assert_eq!(pubsub_auth::http_date(at), "Sun, 01 Mar 2026 12:00:00 +0000");
/// ```
#[must_use]
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// The parts of a request that take part in its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningRequest<'a> {
    /// HTTP method, e.g. `PUT`.
    pub method: &'a str,
    /// Resource path, e.g. `/topics/mytopic`.
    pub resource: &'a str,
    /// Encoded query string including the leading `?`, or empty.
    pub query: &'a str,
    /// Whether the query string is appended to the string to sign.
    pub sign_query: bool,
}

impl<'a> SigningRequest<'a> {
    /// A request with no query string.
    #[must_use]
    pub fn new(method: &'a str, resource: &'a str) -> Self {
        Self {
            method,
            resource,
            query: "",
            sign_query: false,
        }
    }

    /// Attach an encoded query string (with leading `?`).
    #[must_use]
    pub fn with_query(mut self, query: &'a str, sign_query: bool) -> Self {
        self.query = query;
        self.sign_query = sign_query;
        self
    }

    /// Build the string to sign for the given `Date` header value.
    #[must_use]
    pub fn string_to_sign(&self, date: &str) -> String {
        let mut out = format!("{}\n\n\n{date}\n{}", self.method, self.resource);
        if self.sign_query {
            out.push_str(self.query);
        }
        out
    }
}

/// Header values produced by [`Signer::sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `Date` header.
    pub date: String,
}

/// Signs requests with a fixed access key / secret key pair.
#[derive(Clone)]
pub struct Signer {
    access_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Signer {
    /// Create a signer for the given credentials.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The access key ID this signer stamps into the `Authorization` header.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Sign a request as of `at`.
    #[must_use]
    pub fn sign(&self, request: &SigningRequest<'_>, at: DateTime<Utc>) -> SignedHeaders {
        let date = http_date(at);
        let string_to_sign = request.string_to_sign(&date);

        debug!(string_to_sign = ?string_to_sign, "Built SigV2 string to sign");

        let signature = compute_sigv2_signature(&self.secret_key, &string_to_sign);
        SignedHeaders {
            authorization: format!("AWS {}:{signature}", self.access_key),
            date,
        }
    }
}

/// How the verifier treats the query string of an incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySigning {
    /// Only the path is signed (topics, notifications, subscriptions).
    Excluded,
    /// The raw query string is appended to the path (S3-compatible surface).
    Raw,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRequest {
    /// The access key that signed the request.
    pub access_key_id: String,
}

/// Verify a SigV2-signed HTTP request.
///
/// # Errors
///
/// Returns an [`AuthError`] if the header is malformed, the access key is not
/// found, or the signature does not match.
pub fn verify_sigv2(
    parts: &http::request::Parts,
    credential_provider: &dyn CredentialProvider,
    query_signing: QuerySigning,
) -> Result<VerifiedRequest, AuthError> {
    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let (access_key_id, provided_signature) = parse_sigv2_header(auth_header)?;

    debug!(access_key_id = %access_key_id, "Verifying SigV2 signature");

    let secret_key = credential_provider.get_secret_key(&access_key_id)?;

    let date = parts
        .headers
        .get(http::header::DATE)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingDate)?;

    let query = parts
        .uri
        .query()
        .map(|q| format!("?{q}"))
        .unwrap_or_default();
    let request = SigningRequest::new(parts.method.as_str(), parts.uri.path())
        .with_query(&query, query_signing == QuerySigning::Raw);
    let expected_signature = compute_sigv2_signature(&secret_key, &request.string_to_sign(date));

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        Ok(VerifiedRequest { access_key_id })
    } else {
        debug!(
            expected = %expected_signature,
            provided = %provided_signature,
            "SigV2 signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// Parse a SigV2 `Authorization` header: `AWS AKID:Signature`.
fn parse_sigv2_header(header: &str) -> Result<(String, String), AuthError> {
    let rest = header
        .strip_prefix("AWS ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let (access_key_id, signature) = rest.split_once(':').ok_or(AuthError::InvalidAuthHeader)?;

    if access_key_id.is_empty() || signature.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok((access_key_id.to_owned(), signature.to_owned()))
}

/// Compute the SigV2 signature: Base64(HMAC-SHA1(secret, string_to_sign)).
fn compute_sigv2_signature(secret_key: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
