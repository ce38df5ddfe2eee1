use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use catalog_server::{
    api::{self, Views},
    repository::Repository,
    services::Services,
    AppState,
};

/// Router over a fresh, empty in-memory catalog
pub fn app() -> Router {
    let views = Views::load(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
        .expect("templates should compile");
    api::router(AppState {
        services: Arc::new(Services::new(Repository::in_memory())),
        views: Arc::new(views),
    })
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Page {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("ascii location").to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    Page {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Page {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// POST an already url-encoded form body
pub async fn post(app: &Router, uri: &str, form: &str) -> Page {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a form that must redirect; returns the redirect target
pub async fn post_redirect(app: &Router, uri: &str, form: &str) -> String {
    let page = post(app, uri, form).await;
    assert_eq!(page.status, StatusCode::FOUND, "body: {}", page.body);
    page.location.expect("redirect without Location")
}

/// Last path segment of a record url
pub fn id_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}

pub async fn create_author(app: &Router, first: &str, family: &str) -> String {
    post_redirect(
        app,
        "/catalog/author/create",
        &format!("first_name={}&family_name={}", first, family),
    )
    .await
}

pub async fn create_genre(app: &Router, name: &str) -> String {
    post_redirect(app, "/catalog/genre/create", &format!("name={}", name)).await
}
