//! Cloud-storage SDK seam for bucket notification configuration.
//!
//! The S3-compatible notification client writes (and, for the whole bucket,
//! reads) its configuration through a standard S3 SDK. [`NotificationConfigApi`]
//! is the narrow capability it needs; it is implemented for
//! [`aws_sdk_s3::Client`].
//!
//! Successful calls report the status the gateway actually sent, captured
//! by an interceptor. Service errors that carry an HTTP response are reported
//! as a [`ConfigReply`] with that status and no output, matching the
//! raw-protocol path where status codes are never turned into errors.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::interceptors::BeforeDeserializationInterceptorContextRef;
use aws_sdk_s3::config::{
    BehaviorVersion, ConfigBag, Credentials, Intercept, Region, RuntimeComponents,
};
use aws_sdk_s3::error::{BoxError, DisplayErrorContext, SdkError};
use http::StatusCode;
use parking_lot::Mutex;
use pubsub_xml::{NotificationConfiguration, TopicConfiguration};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Structured output of a notification-configuration call and its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReply<T> {
    /// Parsed output; `None` when the gateway answered with a non-2xx status.
    pub output: Option<T>,
    /// HTTP status code of the response.
    pub status: StatusCode,
}

impl<T> ConfigReply<T> {
    /// A 200 reply carrying `output`.
    pub fn ok(output: T) -> Self {
        Self::with_status(output, StatusCode::OK)
    }

    /// A reply carrying `output` under `status`.
    pub fn with_status(output: T, status: StatusCode) -> Self {
        Self {
            output: Some(output),
            status,
        }
    }

    /// A reply with no output.
    #[must_use]
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            output: None,
            status,
        }
    }
}

/// Get/put bucket notification configuration.
#[async_trait]
pub trait NotificationConfigApi: Send + Sync + fmt::Debug {
    /// Read every notification configured on `bucket`.
    async fn get_notification_configuration(
        &self,
        bucket: &str,
    ) -> ClientResult<ConfigReply<NotificationConfiguration>>;

    /// Replace the notification configuration of `bucket`.
    async fn put_notification_configuration(
        &self,
        bucket: &str,
        configuration: &NotificationConfiguration,
    ) -> ClientResult<ConfigReply<()>>;
}

/// Build an S3 SDK client for the gateway described by `config`.
///
/// Uses path-style addressing; bucket names are never moved into the host.
#[must_use]
pub fn sdk_client(config: &ClientConfig) -> aws_sdk_s3::Client {
    let creds = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "pubsub-client",
    );

    let sdk_config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(creds)
        .endpoint_url(config.connection().endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(sdk_config)
}

/// Remembers the status line of the last response an SDK call received.
#[derive(Debug, Clone, Default)]
struct ResponseStatus(Arc<Mutex<Option<u16>>>);

impl ResponseStatus {
    fn record(&self, code: u16) {
        *self.0.lock() = Some(code);
    }

    /// The captured status, or 200 if the call never reached deserialization.
    fn status(&self) -> StatusCode {
        let code = *self.0.lock();
        code.and_then(|code| StatusCode::from_u16(code).ok()).unwrap_or(StatusCode::OK)
    }
}

impl Intercept for ResponseStatus {
    fn name(&self) -> &'static str {
        "ResponseStatus"
    }

    fn read_after_transmit(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        self.record(context.response().status().as_u16());
        Ok(())
    }
}

#[async_trait]
impl NotificationConfigApi for aws_sdk_s3::Client {
    async fn get_notification_configuration(
        &self,
        bucket: &str,
    ) -> ClientResult<ConfigReply<NotificationConfiguration>> {
        let capture = ResponseStatus::default();
        match self
            .get_bucket_notification_configuration()
            .bucket(bucket)
            .customize()
            .interceptor(capture.clone())
            .send()
            .await
        {
            Ok(output) => {
                let topic_configurations = output
                    .topic_configurations()
                    .iter()
                    .map(|tc| TopicConfiguration {
                        id: tc.id().map(ToOwned::to_owned),
                        topic_arn: tc.topic_arn().to_owned(),
                        events: tc.events().iter().map(|e| e.as_str().to_owned()).collect(),
                    })
                    .collect();
                Ok(ConfigReply::with_status(
                    NotificationConfiguration {
                        topic_configurations,
                    },
                    capture.status(),
                ))
            }
            Err(err) => status_from_sdk_error(&err).map(ConfigReply::status_only),
        }
    }

    async fn put_notification_configuration(
        &self,
        bucket: &str,
        configuration: &NotificationConfiguration,
    ) -> ClientResult<ConfigReply<()>> {
        let topic_configurations = configuration
            .topic_configurations
            .iter()
            .map(to_sdk_topic_configuration)
            .collect::<ClientResult<Vec<_>>>()?;
        let notification = aws_sdk_s3::types::NotificationConfiguration::builder()
            .set_topic_configurations(Some(topic_configurations))
            .build();

        let capture = ResponseStatus::default();
        match self
            .put_bucket_notification_configuration()
            .bucket(bucket)
            .notification_configuration(notification)
            .customize()
            .interceptor(capture.clone())
            .send()
            .await
        {
            Ok(_) => Ok(ConfigReply::with_status((), capture.status())),
            Err(err) => status_from_sdk_error(&err).map(ConfigReply::status_only),
        }
    }
}

fn to_sdk_topic_configuration(
    tc: &TopicConfiguration,
) -> ClientResult<aws_sdk_s3::types::TopicConfiguration> {
    aws_sdk_s3::types::TopicConfiguration::builder()
        .set_id(tc.id.clone())
        .topic_arn(&tc.topic_arn)
        .set_events(Some(
            tc.events
                .iter()
                .map(|e| aws_sdk_s3::types::Event::from(e.as_str()))
                .collect(),
        ))
        .build()
        .map_err(|e| ClientError::Sdk(e.to_string()))
}

/// Extract the HTTP status of a failed SDK call, or fail if there was none.
fn status_from_sdk_error<E>(err: &SdkError<E, HttpResponse>) -> ClientResult<StatusCode>
where
    E: std::error::Error + 'static,
{
    let Some(raw) = err.raw_response() else {
        return Err(ClientError::Sdk(DisplayErrorContext(err).to_string()));
    };
    let code = raw.status().as_u16();
    debug!(status = code, error = %DisplayErrorContext(err), "SDK call answered with error status");
    StatusCode::from_u16(code).map_err(|e| ClientError::Sdk(e.to_string()))
}
