//! Native bucket notification round trips against the stub gateway.

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use pubsub_client::ResourceClient;
    use serde_json::Value;

    use crate::{stub_client, unique_name};

    #[tokio::test]
    async fn test_should_bind_bucket_to_topic_with_event_filter() {
        let (stub, client) = stub_client().await;
        let topic = unique_name("topic");
        let bucket = unique_name("bucket");
        client
            .topic(&topic)
            .expect("valid name")
            .set_config()
            .await
            .expect("create topic");

        let notification = client
            .notification(&bucket, &topic, "OBJECT_CREATE,OBJECT_DELETE")
            .expect("valid names");
        let response = notification.set_config().await.expect("set");
        assert_eq!(response.status, StatusCode::OK);

        let response = notification.get_config().await.expect("get");
        let body: Value = serde_json::from_slice(&response.body).expect("json body");
        let bound = &body["topics"][0];
        assert_eq!(bound["topic"], topic.as_str());
        assert_eq!(bound["events"][0], "OBJECT_CREATE");
        assert_eq!(bound["events"][1], "OBJECT_DELETE");

        let response = notification.del_config().await.expect("delete");
        assert_eq!(response.status, StatusCode::OK);

        let targets: Vec<String> = stub.seen().into_iter().map(|r| r.target).collect();
        assert_eq!(
            targets[1],
            format!("/notifications/bucket/{bucket}?topic={topic}&events=OBJECT_CREATE%2COBJECT_DELETE")
        );
        assert_eq!(targets[2], format!("/notifications/bucket/{bucket}"));
    }

    #[tokio::test]
    async fn test_should_omit_blank_event_filter() {
        let (stub, client) = stub_client().await;
        let topic = unique_name("topic");
        client
            .topic(&topic)
            .expect("valid name")
            .set_config()
            .await
            .expect("create topic");

        client
            .notification("b1", &topic, "")
            .expect("valid names")
            .set_config()
            .await
            .expect("set");

        let last = stub.seen().pop().expect("request seen");
        assert_eq!(last.target, format!("/notifications/bucket/b1?topic={topic}"));
    }

    #[tokio::test]
    async fn test_should_pass_through_missing_topic_status() {
        let (_stub, client) = stub_client().await;
        let response = client
            .notification("b1", "no-such-topic", "")
            .expect("valid names")
            .set_config()
            .await
            .expect("a status is not an error");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
