use axum::http::StatusCode;

use crate::common::*;

#[tokio::test]
async fn test_create_author_then_view() {
    let app = app();
    let url = post_redirect(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=",
    )
    .await;
    assert!(url.starts_with("/catalog/author/"));

    let page = get(&app, &url).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Austen, Jane"));
    assert!(page.body.contains("Dec 16, 1775"));

    let list = get(&app, "/catalog/authors").await;
    assert!(list.body.contains(id_of(&url)));
    assert!(list.body.contains("(Dec 16, 1775 - No data)"));
}

#[tokio::test]
async fn test_invalid_author_rerenders_form() {
    let app = app();
    let page = post(
        &app,
        "/catalog/author/create",
        "first_name=Jane%21&family_name=++Austen++&date_of_birth=16%2F12%2F1775",
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name has non-alphanumeric characters."));
    assert!(page.body.contains("Invalid date of birth"));
    assert!(page.body.contains("value=\"Austen\""));
    assert!(!page.body.contains("Family name must be specified."));

    let list = get(&app, "/catalog/authors").await;
    assert!(list.body.contains("There are no authors."));
}

#[tokio::test]
async fn test_update_prefills_iso_dates() {
    let app = app();
    let url = post_redirect(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
    )
    .await;

    let form = get(&app, &format!("{}/update", url)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"1775-12-16\""));
    assert!(form.body.contains("value=\"1817-07-18\""));

    let same = post_redirect(
        &app,
        &format!("{}/update", url),
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
    )
    .await;
    assert_eq!(same, url);
    let page = get(&app, &url).await;
    assert!(page.body.contains("Lifespan: 42"));
}

#[tokio::test]
async fn test_delete_author_blocked_by_books() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Emma&author={}&summary=Matchmaking&isbn=9780141439587",
            id_of(&author)
        ),
    )
    .await;

    let page = post(&app, &format!("{}/delete", author), "").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Delete the following books"));
    assert!(page.body.contains("Emma"));
    assert_eq!(get(&app, &author).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let app = app();
    let author = create_author(&app, "Anne", "Bronte").await;

    let target = post_redirect(&app, &format!("{}/delete", author), "").await;
    assert_eq!(target, "/catalog/authors");
    assert_eq!(get(&app, &author).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_year_rejected() {
    let app = app();
    let page = post(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=-5000-01-01",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Invalid date of birth"));

    let list = get(&app, "/catalog/authors").await;
    assert!(list.body.contains("There are no authors."));
}

#[tokio::test]
async fn test_overlong_name_rejected() {
    let app = app();
    let page = post(
        &app,
        "/catalog/author/create",
        &format!("first_name={}&family_name=Austen", "J".repeat(101)),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name must not exceed 100 characters."));
}
