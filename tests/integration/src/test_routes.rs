//! Non-listing route integration tests.

#[cfg(test)]
mod tests {
    use crate::{bucket_name, get_json, http_client, server_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_welcome_text() {
        let resp = http_client()
            .get(format!("{}/", server_url()))
            .send()
            .await
            .expect("welcome");

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body = resp.text().await.expect("body");
        assert_eq!(body, "Welcome to the S3 Bucket Content Viewer!");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        let (status, body) = get_json("/health").await.expect("health");
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["bucket"], bucket_name());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_post_with_allow_header() {
        let resp = http_client()
            .post(format!("{}/list-bucket-content/docs", server_url()))
            .send()
            .await
            .expect("post");

        assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("GET, HEAD")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_json_not_found_for_unknown_route() {
        let (status, body) = get_json("/does-not-exist").await.expect("unknown");
        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }
}
