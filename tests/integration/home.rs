use axum::http::StatusCode;
use serde_json::Value;

use crate::common::*;

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let page = get(&app, "/health").await;
    assert_eq!(page.status, StatusCode::OK);

    let body: Value = serde_json::from_str(&page.body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = app();
    let page = get(&app, "/").await;
    assert_eq!(page.status, StatusCode::FOUND);
    assert_eq!(page.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_home_counts() {
    let app = app();
    create_author(&app, "Jane", "Austen").await;
    create_genre(&app, "Fiction").await;
    create_genre(&app, "Romance").await;

    let page = get(&app, "/catalog").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Local Library Home"));
    assert!(page.body.contains("<strong>Authors:</strong> 1"));
    assert!(page.body.contains("<strong>Genres:</strong> 2"));
    assert!(page.body.contains("<strong>Books:</strong> 0"));
}

#[tokio::test]
async fn test_malformed_and_unknown_ids_are_not_found() {
    let app = app();
    for uri in [
        "/catalog/author/not-an-id",
        "/catalog/book/42",
        "/catalog/genre/00000000-0000-0000-0000-000000000000",
        "/catalog/bookinstance/00000000-0000-0000-0000-000000000000/update",
    ] {
        let page = get(&app, uri).await;
        assert_eq!(page.status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(page.body.contains("<h1>404 Not Found</h1>"), "{}", uri);
        assert!(page.body.contains("All books"), "{}", uri);
    }
}
