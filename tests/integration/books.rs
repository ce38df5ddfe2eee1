use axum::http::StatusCode;

use crate::common::*;

#[tokio::test]
async fn test_create_book_without_genre() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;

    let url = post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Pride+and+Prejudice&author={}&summary=Courtship&isbn=9780141439518",
            id_of(&author)
        ),
    )
    .await;

    let page = get(&app, &url).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Title: Pride and Prejudice"));
    assert!(page.body.contains("Austen, Jane"));
    assert!(page.body.contains("There are no copies of this book"));

    let list = get(&app, "/catalog/books").await;
    assert!(list.body.contains("(Austen, Jane)"));
}

#[tokio::test]
async fn test_invalid_book_keeps_genre_selection() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    let fiction = create_genre(&app, "Fiction").await;
    let romance = create_genre(&app, "Romance").await;

    let page = post(
        &app,
        "/catalog/book/create",
        &format!(
            "title=&author={}&summary=Courtship&isbn=1&genre={}&genre={}",
            id_of(&author),
            id_of(&fiction),
            id_of(&romance)
        ),
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Title must not be empty."));
    assert_eq!(page.body.matches(" checked>").count(), 2);
    assert!(page.body.contains(" selected>Austen, Jane"));
}

#[tokio::test]
async fn test_update_form_checks_current_genres() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    let fiction = create_genre(&app, "Fiction").await;
    create_genre(&app, "Romance").await;

    let url = post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Emma&author={}&summary=Matchmaking&isbn=1&genre={}",
            id_of(&author),
            id_of(&fiction)
        ),
    )
    .await;

    let form = get(&app, &format!("{}/update", url)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.body.matches(" checked>").count(), 1);
    assert!(form
        .body
        .contains(&format!("value=\"{}\" checked>", id_of(&fiction))));
}

#[tokio::test]
async fn test_copy_lifecycle() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    let book = post_redirect(
        &app,
        "/catalog/book/create",
        &format!("title=Emma&author={}&summary=s&isbn=1", id_of(&author)),
    )
    .await;

    let copy = post_redirect(
        &app,
        "/catalog/bookinstance/create",
        &format!(
            "book={}&imprint=Penguin+Classics&status=Loaned&due_back=2024-05-01",
            id_of(&book)
        ),
    )
    .await;
    let page = get(&app, &copy).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Copy: Emma"));
    assert!(page.body.contains("May 1, 2024"));

    // The book cannot go while the copy exists
    let blocked = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert!(blocked.body.contains("Penguin Classics"));

    let target = post_redirect(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(target, "/catalog/bookinstances");
    let again = post(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let target = post_redirect(&app, &format!("{}/delete", book), "").await;
    assert_eq!(target, "/catalog/books");
}

#[tokio::test]
async fn test_invalid_copy_status() {
    let app = app();
    let page = post(
        &app,
        "/catalog/bookinstance/create",
        "book=&imprint=Penguin&status=Lost",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Book must be specified."));
    assert!(page.body.contains("Invalid status"));
}

#[tokio::test]
async fn test_update_book_in_place() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    let fiction = create_genre(&app, "Fiction").await;
    let romance = create_genre(&app, "Romance").await;

    let url = post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Emma&author={}&summary=Matchmaking&isbn=1&genre={}",
            id_of(&author),
            id_of(&fiction)
        ),
    )
    .await;

    let same = post_redirect(
        &app,
        &format!("{}/update", url),
        &format!(
            "title=Emma2&author={}&summary=Matchmaking&isbn=1&genre={}",
            id_of(&author),
            id_of(&romance)
        ),
    )
    .await;
    assert_eq!(same, url);

    let page = get(&app, &url).await;
    assert!(page.body.contains("Title: Emma2"));
    assert!(page.body.contains(">Romance</a>"));
    assert!(!page.body.contains(">Fiction</a>"));

    let list = get(&app, "/catalog/books").await;
    assert_eq!(list.body.matches(id_of(&url)).count(), 1);
}

#[tokio::test]
async fn test_invalid_update_rerenders_form() {
    let app = app();
    let author = create_author(&app, "Jane", "Austen").await;
    let fiction = create_genre(&app, "Fiction").await;
    create_genre(&app, "Romance").await;

    let url = post_redirect(
        &app,
        "/catalog/book/create",
        &format!(
            "title=Emma&author={}&summary=Matchmaking&isbn=1&genre={}",
            id_of(&author),
            id_of(&fiction)
        ),
    )
    .await;

    let page = post(
        &app,
        &format!("{}/update", url),
        &format!(
            "title=&author={}&summary=Matchmaking&isbn=1&genre={}",
            id_of(&author),
            id_of(&fiction)
        ),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Title must not be empty."));
    assert_eq!(page.body.matches(" checked>").count(), 1);

    let detail = get(&app, &url).await;
    assert!(detail.body.contains("Title: Emma<"));
}

#[tokio::test]
async fn test_repeated_scalar_key_is_bad_request() {
    let app = app();
    let page = post(&app, "/catalog/bookinstance/create", "imprint=A&imprint=B").await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("400 Bad Request"));
    assert!(page.body.contains("All book-instances"));
}
