//! Integration tests for the pub-sub client.
//!
//! Most tests run against [`stub::StubGateway`], an in-process gateway that
//! verifies signatures and keeps state in memory, so they need no external
//! service. Tests marked `#[ignore]` expect a real gateway with the pub-sub
//! extension reachable through the `PUBSUB_*` environment variables.
//!
//! Run the live tests with:
//! ```text
//! PUBSUB_HOST=rgw PUBSUB_PORT=8000 cargo test -p pubsub-integration -- --ignored
//! ```

use std::sync::Once;

use pubsub_client::{ClientConfig, PubSubClient};


use crate::stub::{STUB_ACCESS_KEY, STUB_SECRET_KEY, StubGateway};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration pointing at `stub` with its credentials.
#[must_use]
pub fn stub_config(stub: &StubGateway) -> ClientConfig {
    ClientConfig::builder()
        .host("127.0.0.1".to_owned())
        .port(stub.port())
        .access_key(STUB_ACCESS_KEY.to_owned())
        .secret_key(STUB_SECRET_KEY.to_owned())
        .wire_trace(true)
        .build()
}

/// Start a stub gateway and a client connected to it.
pub async fn stub_client() -> (StubGateway, PubSubClient) {
    init_tracing();
    let stub = StubGateway::start().await.expect("start stub gateway");
    let client = PubSubClient::new(&stub_config(&stub)).expect("build client");
    (stub, client)
}

/// Client for the live gateway described by the environment.
#[must_use]
pub fn live_client() -> PubSubClient {
    init_tracing();
    PubSubClient::new(&ClientConfig::from_env()).expect("build client")
}

/// Generate a unique resource name for a test.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

mod test_auth;
mod test_live;
mod test_notification;
mod test_s3_notification;
mod test_subscription;
mod test_topic;
