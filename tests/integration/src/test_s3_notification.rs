//! S3-compatible notification round trips against the stub gateway.
//!
//! Creation and whole-bucket reads go through the S3 SDK; single reads and
//! deletes are raw requests with the query string signed.

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};

    use crate::stub_client;

    const TOPIC_ARN: &str = "arn:aws:sns:default::t1";

    #[tokio::test]
    async fn test_should_create_and_read_single_notification() {
        let (stub, client) = stub_client().await;
        let notification = client
            .s3_notification(
                "b1",
                "n1",
                TOPIC_ARN,
                vec!["s3:ObjectCreated:*".to_owned()],
            )
            .expect("valid bucket");

        let reply = notification.set_config().await.expect("set");
        assert_eq!(reply.status, StatusCode::OK);
        let sdk_put = stub.seen().pop().expect("request seen");
        assert_eq!(sdk_put.method, Method::PUT);
        assert!(sdk_put.target.starts_with("/b1"));
        assert!(sdk_put.target.contains("?notification"));
        assert!(!sdk_put.sigv2_verified);

        let reply = notification.get_config(false).await.expect("get one");
        assert_eq!(reply.status, StatusCode::OK);
        let config = reply.output.expect("parsed configuration");
        let tc = config.find("n1").expect("notification n1");
        assert_eq!(tc.topic_arn, TOPIC_ARN);
        assert_eq!(tc.events, vec!["s3:ObjectCreated:*"]);

        let raw = stub.seen().pop().expect("request seen");
        assert_eq!(raw.target, "/b1?notification=n1");
        assert!(raw.sigv2_verified);
    }

    #[tokio::test]
    async fn test_should_read_all_notifications_through_sdk() {
        let (stub, client) = stub_client().await;
        for id in ["n1", "n2"] {
            client
                .s3_notification("b1", id, TOPIC_ARN, vec!["s3:ObjectRemoved:*".to_owned()])
                .expect("valid bucket")
                .set_config()
                .await
                .expect("set");
        }

        let reply = client
            .s3_notification("b1", "n2", TOPIC_ARN, Vec::new())
            .expect("valid bucket")
            .get_config(true)
            .await
            .expect("get all");
        let config = reply.output.expect("parsed configuration");
        assert_eq!(config.topic_configurations.len(), 1);
        assert!(config.find("n2").is_some());

        let sdk_get = stub.seen().pop().expect("request seen");
        assert_eq!(sdk_get.method, Method::GET);
        assert!(!sdk_get.sigv2_verified);
    }

    #[tokio::test]
    async fn test_should_report_status_sent_on_sdk_success() {
        let (stub, client) = stub_client().await;
        stub.set_s3_put_status(StatusCode::NO_CONTENT);

        let reply = client
            .s3_notification("b1", "n1", TOPIC_ARN, vec!["s3:ObjectCreated:*".to_owned()])
            .expect("valid bucket")
            .set_config()
            .await
            .expect("set");
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_should_not_parse_missing_notification() {
        let (_stub, client) = stub_client().await;
        let reply = client
            .s3_notification("b1", "absent", TOPIC_ARN, Vec::new())
            .expect("valid bucket")
            .get_config(false)
            .await
            .expect("a status is not an error");
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(reply.output.is_none());
    }

    #[tokio::test]
    async fn test_should_delete_one_then_all() {
        let (stub, client) = stub_client().await;
        let notification = client
            .s3_notification("b1", "n1", TOPIC_ARN, vec!["s3:ObjectCreated:*".to_owned()])
            .expect("valid bucket");
        notification.set_config().await.expect("set");

        let response = notification.del_config(false).await.expect("delete one");
        assert!(response.is_success());
        assert_eq!(
            stub.seen().pop().expect("request seen").target,
            "/b1?notification=n1"
        );

        let reply = notification.get_config(false).await.expect("get after delete");
        assert_eq!(reply.status, StatusCode::NOT_FOUND);

        let response = notification.del_config(true).await.expect("delete all");
        assert!(response.is_success());
        let last = stub.seen().pop().expect("request seen");
        assert_eq!(last.target, "/b1?notification");
        assert!(last.sigv2_verified);
    }
}
