//! Error types for the pub-sub client.
//!
//! HTTP status codes are never turned into errors: a 404 or 500 from the
//! gateway is an ordinary response that the caller inspects.

/// Errors raised by the client before, or instead of, a response.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A resource name was empty or whitespace-only.
    #[error("{kind} name must not be empty")]
    InvalidName {
        /// Which resource the name belonged to (`topic`, `bucket`, ...).
        kind: &'static str,
    },

    /// Connect, timeout or protocol failure from the HTTP stack.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway URL could not be built from the configured host and port.
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A signed header could not be represented as an HTTP header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// The response body of a single-notification read was not valid XML.
    #[error("XML error: {0}")]
    Xml(#[from] pubsub_xml::XmlError),

    /// The cloud-storage SDK failed without producing an HTTP response.
    #[error("SDK error: {0}")]
    Sdk(String),

    /// The zone provisioning collaborator failed.
    #[error("zone command failed: {0}")]
    Zone(String),
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
