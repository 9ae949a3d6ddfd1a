//! Native bucket notification client.
//!
//! ```text
//! PUT    /notifications/bucket/<bucket>?topic=<topic>[&events=<event>[,<event>]]
//! GET    /notifications/bucket/<bucket>
//! DELETE /notifications/bucket/<bucket>?topic=<topic>[&events=...]
//! ```
//!
//! A read returns every notification attached to the bucket; the gateway does
//! not filter by topic at this path.

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;

use crate::error::ClientResult;
use crate::query::QueryParams;
use crate::resource::{ResourceClient, validate_name};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Client for the notification binding a bucket to a topic.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    transport: Arc<Transport>,
    bucket: String,
    topic: String,
    resource: String,
    params: QueryParams,
}

impl NotificationClient {
    /// A client binding `bucket` to `topic`.
    ///
    /// `events` is a comma-separated event filter; blank means all events and
    /// is left out of the request entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the bucket or topic name is blank.
    pub fn new(
        transport: Arc<Transport>,
        bucket: impl Into<String>,
        topic: impl Into<String>,
        events: &str,
    ) -> ClientResult<Self> {
        let bucket = bucket.into();
        let topic = topic.into();
        validate_name("bucket", &bucket)?;
        validate_name("topic", &topic)?;

        let mut params = QueryParams::new().with("topic", &topic);
        if !events.trim().is_empty() {
            params = params.with("events", events);
        }

        Ok(Self {
            transport,
            resource: format!("/notifications/bucket/{bucket}"),
            bucket,
            topic,
            params,
        })
    }

    /// Bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Topic name.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Parameters sent on create and delete.
    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

#[async_trait]
impl ResourceClient for NotificationClient {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn get_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::GET, &self.resource))
            .await
    }

    async fn set_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(&ApiRequest::new(Method::PUT, &self.resource).params(Some(self.params.clone())))
            .await
    }

    async fn del_config(&self) -> ClientResult<RawResponse> {
        self.transport
            .send(
                &ApiRequest::new(Method::DELETE, &self.resource).params(Some(self.params.clone())),
            )
            .await
    }
}
