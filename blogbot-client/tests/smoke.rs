use blogbot_client::{BlogClient, BlogClientError};

#[tokio::test]
#[ignore = "requires running API server and database"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("BLOG_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    let username = std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");

    let anonymous = BlogClient::new(base_url.clone()).expect("client must build");
    let health = anonymous.health().await.expect("health must succeed");
    assert_eq!(health.status, "healthy");

    let rejected = anonymous.create_post("title", "content").await;
    assert!(matches!(rejected, Err(BlogClientError::Unauthorized)));

    let client = BlogClient::new(base_url)
        .expect("client must build")
        .with_credentials(username, password);

    let created = client
        .create_post("http title", "http content")
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, "http title");

    let fetched = client
        .get_post(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);

    let listed = client.list_posts().await.expect("list_posts must succeed");
    assert_eq!(listed.first().map(|post| post.id), Some(created.id));

    let updated = client
        .update_post(created.id, "http title updated", "http content updated")
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "http title updated");
    assert_eq!(updated.created_at, created.created_at);

    client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(BlogClientError::NotFound)));
}
