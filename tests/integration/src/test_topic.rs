//! Topic round trips against the stub gateway.

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use pubsub_client::ResourceClient;
    use serde_json::Value;

    use crate::{stub_client, unique_name};

    #[tokio::test]
    async fn test_should_create_read_and_delete_topic() {
        let (stub, client) = stub_client().await;
        let name = unique_name("topic");
        let topic = client
            .topic(&name)
            .expect("valid name")
            .with_endpoint("amqp://broker:5672", Some("amqp-exchange=ex1".to_owned()));

        let response = topic.set_config().await.expect("set");
        assert_eq!(response.status, StatusCode::OK);

        let response = topic.get_config().await.expect("get");
        assert_eq!(response.status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&response.body).expect("json body");
        assert_eq!(body["topic"]["name"], name.as_str());
        assert_eq!(body["topic"]["dest"]["push_endpoint"], "amqp://broker:5672");
        assert_eq!(body["topic"]["dest"]["push_endpoint_args"], "amqp-exchange=ex1");

        let response = topic.del_config().await.expect("delete");
        assert_eq!(response.status, StatusCode::OK);

        let response = topic.get_config().await.expect("get after delete");
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        assert!(stub.seen().iter().all(|r| r.sigv2_verified));
    }

    #[tokio::test]
    async fn test_should_list_created_topics() {
        let (_stub, client) = stub_client().await;
        let first = unique_name("list");
        let second = unique_name("list");
        for name in [&first, &second] {
            client
                .topic(name)
                .expect("valid name")
                .set_config()
                .await
                .expect("set");
        }

        let response = client.list_topics().await.expect("list");
        assert_eq!(response.status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&response.body).expect("json body");
        let names: Vec<&str> = body["topics"]
            .as_array()
            .expect("topics array")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert!(names.contains(&first.as_str()));
        assert!(names.contains(&second.as_str()));

        let via_topic = client
            .topic(&first)
            .expect("valid name")
            .list_config()
            .await
            .expect("list through topic");
        assert_eq!(via_topic.body, response.body);
    }

    #[tokio::test]
    async fn test_should_send_topic_without_endpoint_as_bare_path() {
        let (stub, client) = stub_client().await;
        let name = unique_name("bare");
        client
            .topic(&name)
            .expect("valid name")
            .set_config()
            .await
            .expect("set");

        let seen = stub.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].target, format!("/topics/{name}"));
    }
}
