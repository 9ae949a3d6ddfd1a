//! Client configuration and the connection descriptor.
//!
//! [`ClientConfig`] is loaded from environment variables (or built with its
//! typed builder) and produces the immutable [`Connection`] shared by every
//! resource client, plus the [`TransportConfig`] for the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Where the gateway lives and which credentials sign requests to it.
///
/// Immutable for the lifetime of the clients created against it. `Debug`
/// never prints the secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    host: String,
    port: u16,
    access_key: String,
    secret_key: String,
}

impl Connection {
    /// Create a connection descriptor.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Gateway host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Gateway port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Access key ID.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Secret access key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Value of the `Host` header: `host:port`.
    #[must_use]
    pub fn host_header(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL of the gateway, e.g. `http://localhost:8000`.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// One-line description of the endpoint and access key, secret redacted.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "endpoint {} access key {} secret key <redacted>",
            self.host_header(),
            self.access_key
        )
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Settings for the HTTP transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    /// Log every request and response line and header at `debug` level.
    pub wire_trace: bool,
}

/// Pub-sub client configuration.
///
/// # Examples
///
/// ```
/// use pubsub_client::ClientConfig;
///
/// let config = ClientConfig::builder().host("rgw.local".into()).port(8080).build();
/// assert_eq!(config.connection().endpoint_url(), "http://rgw.local:8080");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Gateway host name.
    #[builder(default = String::from("localhost"))]
    pub host: String,

    /// Gateway port.
    #[builder(default = 8000)]
    pub port: u16,

    /// Access key ID used to sign requests.
    #[builder(default = String::from("test"))]
    pub access_key: String,

    /// Secret access key used to sign requests.
    #[builder(default = String::from("test"))]
    pub secret_key: String,

    /// Region handed to the cloud-storage SDK.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Whether the transport traces each request and response.
    #[builder(default = false)]
    pub wire_trace: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("wire_trace", &self.wire_trace)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PUBSUB_HOST` | `localhost` |
    /// | `PUBSUB_PORT` | `8000` |
    /// | `PUBSUB_ACCESS_KEY` | `test` |
    /// | `PUBSUB_SECRET_KEY` | `test` |
    /// | `PUBSUB_REGION` | `us-east-1` |
    /// | `PUBSUB_WIRE_TRACE` | `false` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Unparseable ports are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key-value source using the variable names
    /// of [`from_env`](Self::from_env).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("PUBSUB_HOST") {
            config.host = v;
        }
        if let Some(port) = lookup("PUBSUB_PORT").and_then(|v| v.parse::<u16>().ok()) {
            config.port = port;
        }
        if let Some(v) = lookup("PUBSUB_ACCESS_KEY") {
            config.access_key = v;
        }
        if let Some(v) = lookup("PUBSUB_SECRET_KEY") {
            config.secret_key = v;
        }
        if let Some(v) = lookup("PUBSUB_REGION") {
            config.region = v;
        }
        if let Some(v) = lookup("PUBSUB_WIRE_TRACE") {
            config.wire_trace = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The connection descriptor described by this configuration.
    #[must_use]
    pub fn connection(&self) -> Connection {
        Connection::new(
            self.host.clone(),
            self.port,
            self.access_key.clone(),
            self.secret_key.clone(),
        )
    }

    /// The transport settings described by this configuration.
    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            wire_trace: self.wire_trace,
        }
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
