//! The interface shared by the native resource clients.

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::transport::RawResponse;

/// A named gateway resource with create, read and delete operations.
///
/// Every operation is a single signed request; the returned response carries
/// the gateway's status code uninterpreted.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Resource path this client addresses, e.g. `/topics/mytopic`.
    fn resource(&self) -> &str;

    /// Read the resource.
    async fn get_config(&self) -> ClientResult<RawResponse>;

    /// Create or update the resource.
    async fn set_config(&self) -> ClientResult<RawResponse>;

    /// Delete the resource.
    async fn del_config(&self) -> ClientResult<RawResponse>;
}

/// Push endpoint of a topic or subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEndpoint {
    /// Endpoint URL, sent as the `push-endpoint` parameter.
    pub url: String,
    /// Pre-encoded endpoint arguments appended to the query verbatim.
    pub args: Option<String>,
}

impl PushEndpoint {
    /// An endpoint with optional pre-encoded arguments.
    pub fn new(url: impl Into<String>, args: Option<String>) -> Self {
        Self {
            url: url.into(),
            args,
        }
    }
}

/// Reject names that are empty after trimming whitespace.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> ClientResult<()> {
    if name.trim().is_empty() {
        return Err(ClientError::InvalidName { kind });
    }
    Ok(())
}
