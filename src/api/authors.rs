//! Author pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use super::{found, PageForm, RecordId};
use crate::{
    error::AppResult,
    models::{
        author::{AuthorForm, AuthorView},
        book::BookView,
    },
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let today = Utc::now().date_naive();
    let author_list: Vec<AuthorView> = state
        .services
        .authors
        .list()
        .await?
        .iter()
        .map(|a| AuthorView::new(a, today))
        .collect();

    state.views.render(
        "author/author_list.html",
        json!({ "title": "Author List", "author_list": author_list }),
    )
}

/// Author with the books they wrote
pub async fn detail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.with_books(id).await?;
    let books: Vec<BookView> = books.iter().map(BookView::from).collect();

    state.views.render(
        "author/author_detail.html",
        json!({
            "title": author.name(),
            "author": AuthorView::new(&author, Utc::now().date_naive()),
            "books": books,
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(
        "author/author_form.html",
        json!({ "title": "Create Author", "author": AuthorForm::default(), "errors": [] }),
    )
}

pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        FormOutcome::Invalid { form, errors } => Ok(state
            .views
            .render(
                "author/author_form.html",
                json!({ "title": "Create Author", "author": form, "errors": errors }),
            )?
            .into_response()),
        FormOutcome::Saved(author) | FormOutcome::Existing(author) => Ok(found(&author.url())),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    state.views.render(
        "author/author_form.html",
        json!({
            "title": "Update Author",
            "author": AuthorForm::from_author(&author),
            "errors": [],
        }),
    )
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    PageForm(form): PageForm<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, form).await? {
        FormOutcome::Invalid { form, errors } => Ok(state
            .views
            .render(
                "author/author_form.html",
                json!({ "title": "Update Author", "author": form, "errors": errors }),
            )?
            .into_response()),
        FormOutcome::Saved(author) | FormOutcome::Existing(author) => Ok(found(&author.url())),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.with_books(id).await?;
    let author_books: Vec<BookView> = books.iter().map(BookView::from).collect();

    state.views.render(
        "author/author_delete.html",
        json!({
            "title": "Delete Author",
            "author": AuthorView::new(&author, Utc::now().date_naive()),
            "author_books": author_books,
        }),
    )
}

/// Delete, or show the confirmation page again while books remain
pub async fn delete(State(state): State<AppState>, RecordId(id): RecordId) -> AppResult<Response> {
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Deleted => Ok(found("/catalog/authors")),
        DeleteOutcome::Blocked { record, dependents } => {
            let author_books: Vec<BookView> = dependents.iter().map(BookView::from).collect();
            Ok(state
                .views
                .render(
                    "author/author_delete.html",
                    json!({
                        "title": "Delete Author",
                        "author": AuthorView::new(&record, Utc::now().date_naive()),
                        "author_books": author_books,
                    }),
                )?
                .into_response())
        }
    }
}
