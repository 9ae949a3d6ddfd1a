//! Entry point tying a connection, its transport and the SDK together.

use std::sync::Arc;

use tracing::info;

use crate::config::{ClientConfig, Connection};
use crate::error::ClientResult;
use crate::notification::NotificationClient;
use crate::s3_notification::S3NotificationClient;
use crate::sdk::{NotificationConfigApi, sdk_client};
use crate::subscription::SubscriptionClient;
use crate::topic::{TopicClient, list_topics};
use crate::transport::{RawResponse, Transport};

/// Factory for resource clients sharing one connection.
///
/// # Examples
///
/// ```no_run
/// use pubsub_client::{ClientConfig, PubSubClient, ResourceClient};
///
/// # async fn run() -> pubsub_client::ClientResult<()> {
/// let client = PubSubClient::new(&ClientConfig::from_env())?;
/// let topic = client
///     .topic("mytopic")?
///     .with_endpoint("http://consumer:9001", None);
/// let response = topic.set_config().await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PubSubClient {
    transport: Arc<Transport>,
    sdk: Arc<dyn NotificationConfigApi>,
}

impl PubSubClient {
    /// A client over the default HTTP backend and an S3 SDK client for the
    /// same gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`](crate::ClientError::Transport) if the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let connection = Arc::new(config.connection());
        info!(connection = %connection.describe(), "pub-sub client ready");
        let transport = Arc::new(Transport::new(connection, config.transport_config())?);
        Ok(Self::from_parts(transport, Arc::new(sdk_client(config))))
    }

    /// A client over an existing transport and SDK seam.
    #[must_use]
    pub fn from_parts(transport: Arc<Transport>, sdk: Arc<dyn NotificationConfigApi>) -> Self {
        Self { transport, sdk }
    }

    /// The connection every client of this factory talks to.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        self.transport.connection()
    }

    /// Client for topic `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if `name` is blank.
    pub fn topic(&self, name: impl Into<String>) -> ClientResult<TopicClient> {
        TopicClient::new(Arc::clone(&self.transport), name)
    }

    /// Client binding `bucket` to `topic` for the comma-separated `events`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the bucket or topic name is blank.
    pub fn notification(
        &self,
        bucket: impl Into<String>,
        topic: impl Into<String>,
        events: &str,
    ) -> ClientResult<NotificationClient> {
        NotificationClient::new(Arc::clone(&self.transport), bucket, topic, events)
    }

    /// Client for subscription `name` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the subscription or topic name is blank.
    pub fn subscription(
        &self,
        name: impl Into<String>,
        topic: impl Into<String>,
    ) -> ClientResult<SubscriptionClient> {
        SubscriptionClient::new(Arc::clone(&self.transport), name, topic)
    }

    /// Client for S3-style notification `notification_id` on `bucket`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidName`](crate::ClientError::InvalidName)
    /// if the bucket name is blank.
    pub fn s3_notification(
        &self,
        bucket: impl Into<String>,
        notification_id: impl Into<String>,
        topic_arn: impl Into<String>,
        events: Vec<String>,
    ) -> ClientResult<S3NotificationClient> {
        S3NotificationClient::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.sdk),
            bucket,
            notification_id,
            topic_arn,
            events,
        )
    }

    /// List every topic on the gateway.
    pub async fn list_topics(&self) -> ClientResult<RawResponse> {
        list_topics(&self.transport).await
    }
}
