//! Subscription and event-queue round trips against the stub gateway.

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};
    use pubsub_client::{PubSubClient, ResourceClient, SubscriptionClient};
    use serde_json::Value;

    use crate::stub::StubGateway;
    use crate::{stub_client, unique_name};

    async fn subscribed(client: &PubSubClient) -> SubscriptionClient {
        let topic = unique_name("topic");
        client
            .topic(&topic)
            .expect("valid name")
            .set_config()
            .await
            .expect("create topic");

        let sub = client
            .subscription(unique_name("sub"), &topic)
            .expect("valid names")
            .with_endpoint("http://consumer:9001", None);
        let response = sub.set_config().await.expect("create subscription");
        assert_eq!(response.status, StatusCode::OK);
        sub
    }

    fn publish_all(stub: &StubGateway, sub: &SubscriptionClient, ids: &[&str]) {
        for id in ids {
            assert!(stub.publish(sub.name(), id));
        }
    }

    async fn events(sub: &SubscriptionClient, max: Option<u32>, marker: Option<&str>) -> Value {
        let response = sub.get_events(max, marker).await.expect("get events");
        assert_eq!(response.status, StatusCode::OK);
        serde_json::from_slice(&response.body).expect("json body")
    }

    #[tokio::test]
    async fn test_should_create_and_read_subscription() {
        let (_stub, client) = stub_client().await;
        let sub = subscribed(&client).await;

        let response = sub.get_config().await.expect("get");
        let body: Value = serde_json::from_slice(&response.body).expect("json body");
        assert_eq!(body["topic"], sub.topic());
        assert_eq!(body["dest"]["push_endpoint"], "http://consumer:9001");
    }

    #[tokio::test]
    async fn test_should_page_events_with_marker() {
        let (stub, client) = stub_client().await;
        let sub = subscribed(&client).await;
        publish_all(&stub, &sub, &["e1", "e2", "e3"]);

        let page = events(&sub, Some(2), None).await;
        assert_eq!(page["events"].as_array().map(Vec::len), Some(2));
        assert_eq!(page["is_truncated"], true);
        assert_eq!(page["next_marker"], "e2");

        let page = events(&sub, Some(2), Some("e2")).await;
        assert_eq!(page["events"][0]["id"], "e3");
        assert_eq!(page["is_truncated"], false);

        let last = stub.seen().pop().expect("request seen");
        assert_eq!(
            last.target,
            format!("/subscriptions/{}?events&max-entries=2&marker=e2", sub.name())
        );
    }

    #[tokio::test]
    async fn test_should_remove_acknowledged_event() {
        let (stub, client) = stub_client().await;
        let sub = subscribed(&client).await;
        publish_all(&stub, &sub, &["e1", "e2"]);

        let response = sub.ack_events("e1").await.expect("ack");
        assert_eq!(response.status, StatusCode::OK);
        let last = stub.seen().pop().expect("request seen");
        assert_eq!(last.method, Method::POST);
        assert_eq!(
            last.target,
            format!("/subscriptions/{}?ack&event-id=e1", sub.name())
        );

        let page = events(&sub, None, None).await;
        assert_eq!(page["events"].as_array().map(Vec::len), Some(1));
        assert_eq!(page["events"][0]["id"], "e2");

        let response = sub.ack_events("e1").await.expect("second ack");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_delete_subscription_by_name_and_by_topic() {
        let (stub, client) = stub_client().await;

        let sub = subscribed(&client).await;
        let response = sub.del_config().await.expect("delete");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            stub.seen().pop().expect("request seen").target,
            format!("/subscriptions/{}", sub.name())
        );

        let sub = subscribed(&client).await;
        let response = sub.del_config_for_topic().await.expect("delete by topic");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            stub.seen().pop().expect("request seen").target,
            format!("/subscriptions/{}?topic={}", sub.name(), sub.topic())
        );

        let response = sub.get_config().await.expect("get after delete");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
