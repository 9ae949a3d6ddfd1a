//! Subscription client.
//!
//! ```text
//! PUT    /subscriptions/<name>?topic=<topic>[&push-endpoint=<endpoint>[&<args>]]
//! GET    /subscriptions/<name>
//! DELETE /subscriptions/<name>[?topic=<topic>]
//! GET    /subscriptions/<name>?events[&max-entries=<n>][&marker=<marker>]
//! POST   /subscriptions/<name>?ack&event-id=<id>
//! ```
//!
//! The event cursor lives on the gateway; callers page with the marker token
//! the previous page returned.

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;

use crate::error::ClientResult;
use crate::query::QueryParams;
use crate::resource::{PushEndpoint, ResourceClient, validate_name};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Client for one subscription bound to one topic.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    transport: Arc<Transport>,
    name: String,
    topic: String,
    resource: String,
    endpoint: Option<PushEndpoint>,
}

impl SubscriptionClient {
    /// A client for subscription `name` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the subscription or topic name is blank.
    pub fn new(
        transport: Arc<Transport>,
        name: impl Into<String>,
        topic: impl Into<String>,
    ) -> ClientResult<Self> {
        let name = name.into();
        let topic = topic.into();
        validate_name("subscription", &name)?;
        validate_name("topic", &topic)?;
        Ok(Self {
            transport,
            resource: format!("/subscriptions/{name}"),
            name,
            topic,
            endpoint: None,
        })
    }

    /// Push events of this subscription to `url`, with optional pre-encoded arguments.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>, args: Option<String>) -> Self {
        self.endpoint = Some(PushEndpoint::new(url, args));
        self
    }

    /// Subscription name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Topic the subscription is bound to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Delete the subscription, naming its topic so the gateway can tell
    /// per-topic bindings apart.
    pub async fn del_config_for_topic(&self) -> ClientResult<RawResponse> {
        let params = QueryParams::new().with("topic", &self.topic);
        self.transport
            .send(&ApiRequest::new(Method::DELETE, &self.resource).params(Some(params)))
            .await
    }

    /// Fetch a page of queued events.
    pub async fn get_events(
        &self,
        max_entries: Option<u32>,
        marker: Option<&str>,
    ) -> ClientResult<RawResponse> {
        let params = QueryParams::new()
            .flag("events")
            .with_opt("max-entries", max_entries)
            .with_opt("marker", marker);
        self.transport
            .send(&ApiRequest::new(Method::GET, &self.resource).params(Some(params)))
            .await
    }

    /// Acknowledge (and remove) the event `event_id`.
    pub async fn ack_events(&self, event_id: &str) -> ClientResult<RawResponse> {
        let params = QueryParams::new().flag("ack").with("event-id", event_id);
        self.transport
            .send(&ApiRequest::new(Method::POST, &self.resource).params(Some(params)))
            .await
    }
}

#[async_trait]
impl ResourceClient for SubscriptionClient {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn get_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::GET, &self.resource))
            .await
    }

    async fn set_config(&self) -> ClientResult<RawResponse> {
        let mut params = QueryParams::new().with("topic", &self.topic);
        let mut extra = None;
        if let Some(endpoint) = &self.endpoint {
            params = params.with("push-endpoint", &endpoint.url);
            extra.clone_from(&endpoint.args);
        }
        self.transport
            .send(
                &ApiRequest::new(Method::PUT, &self.resource)
                    .params(Some(params))
                    .extra(extra),
            )
            .await
    }

    async fn del_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::DELETE, &self.resource))
            .await
    }
}
