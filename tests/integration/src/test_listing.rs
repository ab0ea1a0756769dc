//! Listing integration tests.

#[cfg(test)]
mod tests {
    use crate::{bucket_name, cleanup_prefix, get_json, s3_client, seed_objects, test_prefix};

    const KEYS: &[&str] = &[
        "photos/2024/jan/img1.jpg",
        "photos/2024/feb/img3.jpg",
        "documents/report.pdf",
        "root.txt",
    ];

    fn entries(body: &serde_json::Value) -> Vec<String> {
        body["content"]
            .as_array()
            .expect("content array")
            .iter()
            .map(|v| v.as_str().expect("string entry").to_owned())
            .collect()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_first_level_entries() {
        let client = s3_client();
        let bucket = bucket_name();
        let prefix = test_prefix("first-level");
        seed_objects(&client, &bucket, &prefix, KEYS).await;

        let (status, body) = get_json(&format!("/list-bucket-content/{prefix}"))
            .await
            .expect("list");

        assert_eq!(status, reqwest::StatusCode::OK);
        let mut got = entries(&body);
        got.sort();
        got.dedup();
        assert_eq!(got, vec!["documents", "photos", "root.txt"]);

        cleanup_prefix(&client, &bucket, &prefix).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_strip_outer_slashes() {
        let client = s3_client();
        let bucket = bucket_name();
        let prefix = test_prefix("slashes");
        seed_objects(&client, &bucket, &prefix, KEYS).await;

        let (plain_status, plain) = get_json(&format!("/list-bucket-content/{prefix}/photos/2024"))
            .await
            .expect("plain");
        let (slashed_status, slashed) =
            get_json(&format!("/list-bucket-content//{prefix}/photos/2024/"))
                .await
                .expect("slashed");

        assert_eq!(plain_status, reqwest::StatusCode::OK);
        assert_eq!(slashed_status, reqwest::StatusCode::OK);
        assert_eq!(entries(&plain), entries(&slashed));
        assert_eq!(entries(&plain), vec!["feb", "jan"]);

        cleanup_prefix(&client, &bucket, &prefix).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_empty_prefix() {
        let prefix = test_prefix("missing");

        let (status, body) = get_json(&format!("/list-bucket-content/{prefix}/"))
            .await
            .expect("list");

        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            format!("No content found for path '{prefix}'")
        );
    }
}
