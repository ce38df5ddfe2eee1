//! Genre pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use super::{found, PageForm, RecordId};
use crate::{
    error::AppResult,
    models::{
        book::BookView,
        genre::{GenreForm, GenreView},
    },
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let list_genre: Vec<GenreView> = state
        .services
        .genres
        .list()
        .await?
        .iter()
        .map(GenreView::from)
        .collect();

    state.views.render(
        "genre/genre_list.html",
        json!({ "title": "Genre List", "list_genre": list_genre }),
    )
}

pub async fn detail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.genres.with_books(id).await?;
    let genre_books: Vec<BookView> = books.iter().map(BookView::from).collect();

    state.views.render(
        "genre/genre_detail.html",
        json!({
            "title": "Genre Detail",
            "genre": GenreView::from(&genre),
            "genre_books": genre_books,
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(
        "genre/genre_form.html",
        json!({ "title": "Create Genre", "genre": GenreForm::default(), "errors": [] }),
    )
}

/// Create, or redirect to the genre that already has the submitted name
pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        FormOutcome::Invalid { form, errors } => Ok(state
            .views
            .render(
                "genre/genre_form.html",
                json!({ "title": "Create Genre", "genre": form, "errors": errors }),
            )?
            .into_response()),
        FormOutcome::Saved(genre) | FormOutcome::Existing(genre) => Ok(found(&genre.url())),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(id).await?;
    state.views.render(
        "genre/genre_form.html",
        json!({
            "title": "Update Genre",
            "genre": GenreForm::from_genre(&genre),
            "errors": [],
        }),
    )
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    PageForm(form): PageForm<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, form).await? {
        FormOutcome::Invalid { form, errors } => Ok(state
            .views
            .render(
                "genre/genre_form.html",
                json!({ "title": "Update Genre", "genre": form, "errors": errors }),
            )?
            .into_response()),
        FormOutcome::Saved(genre) | FormOutcome::Existing(genre) => Ok(found(&genre.url())),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.genres.with_books(id).await?;
    let books: Vec<BookView> = books.iter().map(BookView::from).collect();

    state.views.render(
        "genre/genre_delete.html",
        json!({ "title": "Genre Delete", "genre": GenreView::from(&genre), "books": books }),
    )
}

pub async fn delete(State(state): State<AppState>, RecordId(id): RecordId) -> AppResult<Response> {
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Deleted => Ok(found("/catalog/genres")),
        DeleteOutcome::Blocked { record, dependents } => {
            let books: Vec<BookView> = dependents.iter().map(BookView::from).collect();
            Ok(state
                .views
                .render(
                    "genre/genre_delete.html",
                    json!({
                        "title": "Genre Delete",
                        "genre": GenreView::from(&record),
                        "books": books,
                    }),
                )?
                .into_response())
        }
    }
}
