//! Control-plane client for the pub-sub extension of an object-storage gateway.
//!
//! The gateway exposes topics, bucket notifications and pull subscriptions
//! over a small REST surface authenticated with AWS Signature Version 2, plus
//! S3-compatible bucket notifications on `/<bucket>?notification`.
//!
//! ```text
//! PubSubClient (factory, shares one connection)
//!        |
//!        +--> TopicClient / NotificationClient / SubscriptionClient
//!        |           (ResourceClient trait)
//!        |                  |
//!        |                  v
//!        |    Transport (SigV2 signing, HttpBackend)
//!        |
//!        +--> S3NotificationClient --> NotificationConfigApi (S3 SDK)
//!                                  \-> Transport (signed query)
//! ```
//!
//! Each operation is one request. The gateway's status code is returned to the
//! caller as-is; only failures that prevent a response become [`ClientError`]s.
//!
//! # Modules
//!
//! - [`client`] - [`PubSubClient`] factory
//! - [`config`] - Connection descriptor and environment-driven configuration
//! - [`query`] - Ordered query parameters with flag-style keys
//! - [`transport`] - Request signing and dispatch
//! - [`resource`] - The [`ResourceClient`] interface
//! - [`topic`], [`notification`], [`subscription`] - Native resource clients
//! - [`s3_notification`], [`sdk`] - S3-compatible notification client
//! - [`zone`] - Pub-sub zone for multi-site tooling

pub mod client;
pub mod config;
pub mod error;
pub mod notification;
pub mod query;
pub mod resource;
pub mod s3_notification;
pub mod sdk;
pub mod subscription;
pub mod topic;
pub mod transport;
pub mod zone;

#[cfg(test)]
mod test_support;

pub use client::PubSubClient;
pub use config::{ClientConfig, Connection, TransportConfig};
pub use error::{ClientError, ClientResult};
pub use notification::NotificationClient;
pub use query::{QueryParams, build_query};
pub use resource::{PushEndpoint, ResourceClient};
pub use s3_notification::S3NotificationClient;
pub use sdk::{ConfigReply, NotificationConfigApi, sdk_client};
pub use subscription::SubscriptionClient;
pub use topic::TopicClient;
pub use transport::{ApiRequest, HttpBackend, HttpRequest, RawResponse, ReqwestBackend, Transport};
pub use zone::{PUBSUB_TIER_TYPE, PubSubZone, Zone, ZoneCommandRunner};
