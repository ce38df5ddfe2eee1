//! Book pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use super::{found, PageForm, RecordId};
use crate::{
    error::AppResult,
    models::{
        author::AuthorView,
        book::{BookForm, BookView},
        book_instance::BookInstanceView,
        genre::GenreView,
    },
    services::{books::BookFormOptions, DeleteOutcome, FormOutcome},
    AppState,
};

fn form_context(title: &str, book: &BookForm, options: BookFormOptions, errors: Value) -> Value {
    let today = Utc::now().date_naive();
    let authors: Vec<AuthorView> = options
        .authors
        .iter()
        .map(|a| AuthorView::new(a, today))
        .collect();
    json!({
        "title": title,
        "book": book,
        "authors": authors,
        "genres": options.genres,
        "errors": errors,
    })
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let book_list: Vec<Value> = state
        .services
        .books
        .list()
        .await?
        .iter()
        .map(|(book, author)| {
            json!({
                "title": book.title,
                "url": book.url(),
                "author": author.as_ref().map(|a| a.name()),
            })
        })
        .collect();

    state.views.render(
        "book/book_list.html",
        json!({ "title": "Book List", "book_list": book_list }),
    )
}

/// Book with its author, genres and copies
pub async fn detail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(id).await?;
    let today = Utc::now().date_naive();
    let genres: Vec<GenreView> = detail.genres.iter().map(GenreView::from).collect();
    let book_instances: Vec<BookInstanceView> =
        detail.instances.iter().map(BookInstanceView::from).collect();

    state.views.render(
        "book/book_detail.html",
        json!({
            "title": detail.book.title,
            "book": BookView::from(&detail.book),
            "author": detail.author.as_ref().map(|a| AuthorView::new(a, today)),
            "genres": genres,
            "book_instances": book_instances,
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let options = state.services.books.form_options(&[]).await?;
    state.views.render(
        "book/book_form.html",
        form_context("Create Book", &BookForm::default(), options, json!([])),
    )
}

pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        FormOutcome::Invalid { form, errors } => {
            let options = state.services.books.form_options(&form.selected_genres()).await?;
            Ok(state
                .views
                .render(
                    "book/book_form.html",
                    form_context("Create Book", &form, options, json!(errors)),
                )?
                .into_response())
        }
        FormOutcome::Saved(book) | FormOutcome::Existing(book) => Ok(found(&book.url())),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (book, options) = state.services.books.edit(id).await?;
    state.views.render(
        "book/book_form.html",
        form_context("Update Book", &BookForm::from_book(&book), options, json!([])),
    )
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    PageForm(form): PageForm<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(id, form).await? {
        FormOutcome::Invalid { form, errors } => {
            let options = state.services.books.form_options(&form.selected_genres()).await?;
            Ok(state
                .views
                .render(
                    "book/book_form.html",
                    form_context("Update Book", &form, options, json!(errors)),
                )?
                .into_response())
        }
        FormOutcome::Saved(book) | FormOutcome::Existing(book) => Ok(found(&book.url())),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (book, instances) = state.services.books.with_instances(id).await?;
    let book_instances: Vec<BookInstanceView> =
        instances.iter().map(BookInstanceView::from).collect();

    state.views.render(
        "book/book_delete.html",
        json!({
            "title": "Delete Book",
            "book": BookView::from(&book),
            "book_instances": book_instances,
        }),
    )
}

pub async fn delete(State(state): State<AppState>, RecordId(id): RecordId) -> AppResult<Response> {
    match state.services.books.delete(id).await? {
        DeleteOutcome::Deleted => Ok(found("/catalog/books")),
        DeleteOutcome::Blocked { record, dependents } => {
            let book_instances: Vec<BookInstanceView> =
                dependents.iter().map(BookInstanceView::from).collect();
            Ok(state
                .views
                .render(
                    "book/book_delete.html",
                    json!({
                        "title": "Delete Book",
                        "book": BookView::from(&record),
                        "book_instances": book_instances,
                    }),
                )?
                .into_response())
        }
    }
}
