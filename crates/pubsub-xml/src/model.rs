//! Notification configuration model.

use serde::{Deserialize, Serialize};

/// A bucket's notification configuration.
///
/// The client only ever writes a single topic configuration, but the gateway
/// may return several when all notifications of a bucket are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationConfiguration {
    /// Topic configurations, in document order.
    pub topic_configurations: Vec<TopicConfiguration>,
}

impl NotificationConfiguration {
    /// A configuration holding exactly one topic configuration.
    #[must_use]
    pub fn single(topic_configuration: TopicConfiguration) -> Self {
        Self {
            topic_configurations: vec![topic_configuration],
        }
    }

    /// Look up a topic configuration by its notification id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TopicConfiguration> {
        self.topic_configurations
            .iter()
            .find(|tc| tc.id.as_deref() == Some(id))
    }
}

/// One `{Id, TopicArn, Events[]}` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicConfiguration {
    /// Notification id.
    pub id: Option<String>,
    /// ARN of the topic events are published to.
    pub topic_arn: String,
    /// Event types, e.g. `s3:ObjectCreated:*`.
    pub events: Vec<String>,
}
