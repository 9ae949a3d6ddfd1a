//! Topic client.
//!
//! ```text
//! PUT    /topics/<name>[?push-endpoint=<endpoint>[&<args>]]
//! GET    /topics/<name>
//! DELETE /topics/<name>
//! GET    /topics
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;

use crate::error::ClientResult;
use crate::query::QueryParams;
use crate::resource::{PushEndpoint, ResourceClient, validate_name};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Root of the topic collection.
pub const TOPICS_ROOT: &str = "/topics";

/// Client for a single topic.
#[derive(Debug, Clone)]
pub struct TopicClient {
    transport: Arc<Transport>,
    name: String,
    resource: String,
    endpoint: Option<PushEndpoint>,
}

impl TopicClient {
    /// A client for topic `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if `name` is blank.
    pub fn new(transport: Arc<Transport>, name: impl Into<String>) -> ClientResult<Self> {
        let name = name.into();
        validate_name("topic", &name)?;
        Ok(Self {
            transport,
            resource: format!("{TOPICS_ROOT}/{name}"),
            name,
            endpoint: None,
        })
    }

    /// Push events of this topic to `url`, with optional pre-encoded arguments.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>, args: Option<String>) -> Self {
        self.endpoint = Some(PushEndpoint::new(url, args));
        self
    }

    /// Topic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Push endpoint, if configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&PushEndpoint> {
        self.endpoint.as_ref()
    }

    /// List all topics. The topic's own resource path is not used.
    pub async fn list_config(&self) -> ClientResult<RawResponse> {
        list_topics(&self.transport).await
    }
}

/// `GET /topics`.
pub(crate) async fn list_topics(transport: &Transport) -> ClientResult<RawResponse> {
    transport
        .send(&ApiRequest::new(Method::GET, TOPICS_ROOT))
        .await
}

#[async_trait]
impl ResourceClient for TopicClient {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn get_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::GET, &self.resource))
            .await
    }

    async fn set_config(&self) -> ClientResult<RawResponse> {
        let mut request = ApiRequest::new(Method::PUT, &self.resource);
        if let Some(endpoint) = &self.endpoint {
            request = request
                .params(Some(QueryParams::new().with("push-endpoint", &endpoint.url)))
                .extra(endpoint.args.clone());
        }
        self.transport.send(&request).await
    }

    async fn del_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::DELETE, &self.resource))
            .await
    }
}
