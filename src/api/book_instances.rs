//! Book instance (copy) pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde_json::{json, Value};

use super::{found, PageForm, RecordId};
use crate::{
    error::AppResult,
    models::{
        book::{Book, BookView},
        book_instance::{BookInstanceForm, BookInstanceView, BookStatus},
    },
    services::FormOutcome,
    AppState,
};

fn form_context(title: &str, form: &BookInstanceForm, books: &[Book], errors: Value) -> Value {
    let book_list: Vec<BookView> = books.iter().map(BookView::from).collect();
    json!({
        "title": title,
        "bookinstance": form,
        "book_list": book_list,
        "statuses": BookStatus::ALL,
        "errors": errors,
    })
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let bookinstance_list: Vec<Value> = state
        .services
        .book_instances
        .list()
        .await?
        .iter()
        .map(|(instance, book)| {
            json!({
                "instance": BookInstanceView::from(instance),
                "book": book.as_ref().map(BookView::from),
            })
        })
        .collect();

    state.views.render(
        "bookinstance/bookinstance_list.html",
        json!({ "title": "Book Instance List", "bookinstance_list": bookinstance_list }),
    )
}

pub async fn detail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (instance, book) = state.services.book_instances.detail(id).await?;
    let title = match &book {
        Some(book) => format!("Copy: {}", book.title),
        None => "Copy".to_string(),
    };

    state.views.render(
        "bookinstance/bookinstance_detail.html",
        json!({
            "title": title,
            "bookinstance": BookInstanceView::from(&instance),
            "book": book.as_ref().map(BookView::from),
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.book_options().await?;
    state.views.render(
        "bookinstance/bookinstance_form.html",
        form_context(
            "Create BookInstance",
            &BookInstanceForm::default(),
            &books,
            json!([]),
        ),
    )
}

pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        FormOutcome::Invalid { form, errors } => {
            let books = state.services.book_instances.book_options().await?;
            Ok(state
                .views
                .render(
                    "bookinstance/bookinstance_form.html",
                    form_context("Create BookInstance", &form, &books, json!(errors)),
                )?
                .into_response())
        }
        FormOutcome::Saved(instance) | FormOutcome::Existing(instance) => {
            Ok(found(&instance.url()))
        }
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (instance, books) = state.services.book_instances.edit(id).await?;
    state.views.render(
        "bookinstance/bookinstance_form.html",
        form_context(
            "Update BookInstance",
            &BookInstanceForm::from_instance(&instance),
            &books,
            json!([]),
        ),
    )
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    PageForm(form): PageForm<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(id, form).await? {
        FormOutcome::Invalid { form, errors } => {
            let books = state.services.book_instances.book_options().await?;
            Ok(state
                .views
                .render(
                    "bookinstance/bookinstance_form.html",
                    form_context("Update BookInstance", &form, &books, json!(errors)),
                )?
                .into_response())
        }
        FormOutcome::Saved(instance) | FormOutcome::Existing(instance) => {
            Ok(found(&instance.url()))
        }
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (instance, book) = state.services.book_instances.detail(id).await?;
    state.views.render(
        "bookinstance/bookinstance_delete.html",
        json!({
            "title": "Delete BookInstance",
            "bookinstance": BookInstanceView::from(&instance),
            "book": book.as_ref().map(BookView::from),
        }),
    )
}

pub async fn delete(State(state): State<AppState>, RecordId(id): RecordId) -> AppResult<Response> {
    state.services.book_instances.delete(id).await?;
    Ok(found("/catalog/bookinstances"))
}
