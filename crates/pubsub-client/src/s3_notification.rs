//! S3-compatible bucket notification client.
//!
//! ```text
//! PUT    /<bucket>?notification                 (through the SDK)
//! GET    /<bucket>?notification                 (through the SDK)
//! GET    /<bucket>?notification=<id>            (raw, signed query)
//! DELETE /<bucket>?notification[=<id>]          (raw, signed query)
//! ```
//!
//! Create always goes through the standards-based SDK call. Reading a single
//! named notification and deleting are only available on the gateway's own
//! protocol, so those are sent as raw requests whose query string is part of
//! the signature, as S3 requires for sub-resources.

use std::sync::Arc;

use http::Method;
use pubsub_xml::{NotificationConfiguration, TopicConfiguration};

use crate::error::ClientResult;
use crate::query::QueryParams;
use crate::resource::validate_name;
use crate::sdk::{ConfigReply, NotificationConfigApi};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Client for one named S3-style notification on a bucket.
#[derive(Debug, Clone)]
pub struct S3NotificationClient {
    transport: Arc<Transport>,
    sdk: Arc<dyn NotificationConfigApi>,
    bucket: String,
    resource: String,
    notification_id: String,
    topic_arn: String,
    events: Vec<String>,
}

impl S3NotificationClient {
    /// A client for notification `notification_id` on `bucket`, publishing
    /// `events` to the topic `topic_arn`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the bucket name is blank.
    pub fn new(
        transport: Arc<Transport>,
        sdk: Arc<dyn NotificationConfigApi>,
        bucket: impl Into<String>,
        notification_id: impl Into<String>,
        topic_arn: impl Into<String>,
        events: Vec<String>,
    ) -> ClientResult<Self> {
        let bucket = bucket.into();
        validate_name("bucket", &bucket)?;
        Ok(Self {
            transport,
            sdk,
            resource: format!("/{bucket}"),
            bucket,
            notification_id: notification_id.into(),
            topic_arn: topic_arn.into(),
            events,
        })
    }

    /// Resource path, `/<bucket>`.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Notification id.
    #[must_use]
    pub fn notification_id(&self) -> &str {
        &self.notification_id
    }

    /// The configuration [`set_config`](Self::set_config) writes: a single
    /// topic configuration.
    #[must_use]
    pub fn configuration(&self) -> NotificationConfiguration {
        NotificationConfiguration::single(TopicConfiguration {
            id: Some(self.notification_id.clone()),
            topic_arn: self.topic_arn.clone(),
            events: self.events.clone(),
        })
    }

    /// Create the notification through the SDK.
    pub async fn set_config(&self) -> ClientResult<ConfigReply<()>> {
        self.sdk
            .put_notification_configuration(&self.bucket, &self.configuration())
            .await
    }

    /// Read the notification configuration.
    ///
    /// With `all_notifications` the whole bucket configuration is read
    /// through the SDK. Otherwise only this notification is read with a raw
    /// signed request; a 2xx body is parsed as XML, other statuses return no
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`](crate::ClientError::Xml) if a 2xx body is
    /// not a notification configuration document.
    pub async fn get_config(
        &self,
        all_notifications: bool,
    ) -> ClientResult<ConfigReply<NotificationConfiguration>> {
        if all_notifications {
            return self.sdk.get_notification_configuration(&self.bucket).await;
        }

        let params = QueryParams::new().with("notification", &self.notification_id);
        let response = self.send(Method::GET, params).await?;
        if !response.is_success() {
            return Ok(ConfigReply::status_only(response.status));
        }
        Ok(ConfigReply {
            output: Some(pubsub_xml::from_xml(&response.body)?),
            status: response.status,
        })
    }

    /// Delete every notification on the bucket, or only this one.
    pub async fn del_config(&self, all_notifications: bool) -> ClientResult<RawResponse> {
        let params = if all_notifications {
            QueryParams::new().flag("notification")
        } else {
            QueryParams::new().with("notification", &self.notification_id)
        };
        self.send(Method::DELETE, params).await
    }

    async fn send(&self, method: Method, params: QueryParams) -> ClientResult<RawResponse> {
        let request = ApiRequest::new(method, &self.resource)
            .params(Some(params))
            .sign_params(true);
        self.transport.send(&request).await
    }
}
