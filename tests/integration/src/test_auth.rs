//! Signature checks performed by the stub gateway.

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use pubsub_client::{PubSubClient, ResourceClient};

    use crate::stub::StubGateway;
    use crate::stub_config;

    #[tokio::test]
    async fn test_should_reject_wrong_secret_key() {
        let stub = StubGateway::start().await.expect("start stub gateway");
        let mut config = stub_config(&stub);
        config.secret_key = "not-the-secret".to_owned();
        let client = PubSubClient::new(&config).expect("build client");

        let response = client
            .topic("t1")
            .expect("valid name")
            .set_config()
            .await
            .expect("a status is not an error");
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(stub.seen().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_unknown_access_key() {
        let stub = StubGateway::start().await.expect("start stub gateway");
        let mut config = stub_config(&stub);
        config.access_key = "someone-else".to_owned();
        let client = PubSubClient::new(&config).expect("build client");

        let response = client.list_topics().await.expect("a status is not an error");
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_should_sign_query_on_bucket_surface() {
        let stub = StubGateway::start().await.expect("start stub gateway");
        let client = PubSubClient::new(&stub_config(&stub)).expect("build client");

        let response = client
            .s3_notification("b1", "n1", "arn:aws:sns:default::t1", Vec::new())
            .expect("valid bucket")
            .del_config(false)
            .await
            .expect("delete");
        assert!(response.is_success());
        assert!(stub.seen()[0].sigv2_verified);
    }
}
