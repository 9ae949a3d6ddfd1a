//! Tests against a real gateway with the pub-sub extension enabled.

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use pubsub_client::ResourceClient;

    use crate::{live_client, unique_name};

    #[tokio::test]
    #[ignore = "requires running gateway"]
    async fn test_should_round_trip_topic_on_live_gateway() {
        let client = live_client();
        let topic = client
            .topic(unique_name("live"))
            .expect("valid name")
            .with_endpoint("http://localhost:9001", None);

        let response = topic.set_config().await.expect("set");
        assert!(response.is_success(), "status {}", response.status);

        let response = topic.get_config().await.expect("get");
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body_text().contains("localhost:9001"));

        let response = topic.del_config().await.expect("delete");
        assert!(response.is_success(), "status {}", response.status);
    }

    #[tokio::test]
    #[ignore = "requires running gateway"]
    async fn test_should_create_and_drain_subscription_on_live_gateway() {
        let client = live_client();
        let topic_name = unique_name("live");
        let topic = client.topic(&topic_name).expect("valid name");
        topic.set_config().await.expect("create topic");

        let sub = client
            .subscription(unique_name("live-sub"), &topic_name)
            .expect("valid names");
        let response = sub.set_config().await.expect("create subscription");
        assert!(response.is_success(), "status {}", response.status);

        let response = sub.get_events(Some(10), None).await.expect("events");
        assert_eq!(response.status, StatusCode::OK);

        sub.del_config().await.expect("delete subscription");
        topic.del_config().await.expect("delete topic");
    }
}
