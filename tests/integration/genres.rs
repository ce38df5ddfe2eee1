use axum::http::StatusCode;

use crate::common::*;

#[tokio::test]
async fn test_duplicate_genre_redirects_to_existing() {
    let app = app();
    let first = create_genre(&app, "Fiction").await;
    let second = create_genre(&app, "+Fiction+").await;
    assert_eq!(first, second);

    let list = get(&app, "/catalog/genres").await;
    assert_eq!(list.body.matches(">Fiction</a>").count(), 1);
}

#[tokio::test]
async fn test_short_genre_name_rejected() {
    let app = app();
    let page = post(&app, "/catalog/genre/create", "name=SF").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page
        .body
        .contains("Genre name must contain between 3 and 100 characters."));
}

#[tokio::test]
async fn test_genre_markup_is_escaped() {
    let app = app();
    let url = create_genre(&app, "%3Cb%3EBold%3C%2Fb%3E").await;
    let page = get(&app, &url).await;
    assert!(page.body.contains("&lt;b&gt;Bold&lt;&#x2F;b&gt;"));
    assert!(!page.body.contains("<b>Bold</b>"));
}

#[tokio::test]
async fn test_delete_genre_in_use() {
    let app = app();
    let genre = create_genre(&app, "Poetry").await;
    let author = create_author(&app, "John", "Keats").await;
    post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Odes&author={}&summary=Poems&isbn=123&genre={}",
            id_of(&author),
            id_of(&genre)
        ),
    )
    .await;

    let page = post(&app, &format!("{}/delete", genre), "").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Odes"));

    let detail = get(&app, &genre).await;
    assert!(detail.body.contains("Odes"));
}

#[tokio::test]
async fn test_update_genre_in_place() {
    let app = app();
    let url = create_genre(&app, "Fiction").await;

    let same = post_redirect(&app, &format!("{}/update", url), "name=Fantasy").await;
    assert_eq!(same, url);

    let page = get(&app, &url).await;
    assert!(page.body.contains("Genre: Fantasy"));
    let list = get(&app, "/catalog/genres").await;
    assert!(!list.body.contains(">Fiction</a>"));
}

#[tokio::test]
async fn test_update_unknown_genre_is_not_found() {
    let app = app();
    let page = post(
        &app,
        "/catalog/genre/00000000-0000-0000-0000-000000000000/update",
        "name=Fantasy",
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("All genres"));
}

#[tokio::test]
async fn test_repeated_name_is_bad_request() {
    let app = app();
    let page = post(&app, "/catalog/genre/create", "name=Aaa&name=Bbb").await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("<h1>400 Bad Request</h1>"));

    let list = get(&app, "/catalog/genres").await;
    assert!(!list.body.contains("Aaa"));
}
