//! Bucket notification configuration XML.
//!
//! The S3-compatible notification surface of the gateway answers
//! `GET /<bucket>?notification=<id>` with a `NotificationConfiguration`
//! document. This crate holds the typed form of that document together with a
//! quick-xml based parser and serializer.
//!
//! # Key components
//!
//! - [`NotificationConfiguration`] / [`TopicConfiguration`] model types
//! - [`from_xml`] for parsing response bodies
//! - [`to_xml`] for rendering a configuration (used by test gateways)

pub mod deserialize;
pub mod error;
pub mod model;
pub mod serialize;

pub use deserialize::from_xml;
pub use error::XmlError;
pub use model::{NotificationConfiguration, TopicConfiguration};
pub use serialize::{S3_NAMESPACE, to_xml};
