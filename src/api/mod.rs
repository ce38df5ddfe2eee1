//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header::LOCATION, request::Parts, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tera::{Context, Tera};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorPage},
    AppState,
};

/// Record identifier taken from the `:id` path segment.
///
/// Anything that is not a UUID cannot name a record, so it is rejected
/// as not found.
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|_| AppError::NotFound(format!("No record with id {}", raw)))
    }
}

/// Url-encoded form body.
///
/// Repeated keys collect into sequence fields. A body that does not fit
/// the form (a repeated scalar key, a bad content type) is a bad request
/// rendered like every other error page.
pub struct PageForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for PageForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum_extra::extract::Form(form) =
            axum_extra::extract::Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(PageForm(form))
    }
}

/// `302 Found` to `url`
pub fn found(url: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, url.to_string())]).into_response()
}

/// Compiled page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compile every `.html` file under `dir`
    pub fn load(dir: &str) -> Result<Self, tera::Error> {
        let pattern = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let tera = Tera::new(&pattern)?;
        tracing::debug!(
            "Loaded {} templates from {}",
            tera.get_template_names().count(),
            dir
        );
        Ok(Self { tera })
    }

    /// Render `name` with a JSON object as its context
    pub fn render(&self, name: &str, context: serde_json::Value) -> AppResult<Html<String>> {
        let context = Context::from_value(context)?;
        Ok(Html(self.tera.render(name, &context)?))
    }
}

/// Re-render an error response inside the site layout.
///
/// Keeps the plain body built by `AppError` if the page itself fails.
async fn error_layout(State(state): State<AppState>, mut response: Response) -> Response {
    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };

    let context = json!({
        "title": page.status.to_string(),
        "status": page.status.as_u16(),
        "reason": page.status.canonical_reason().unwrap_or("Error"),
        "message": page.message,
    });
    match state.views.render("error.html", context) {
        Ok(html) => (page.status, html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(home::index))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_form).post(authors::create))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/update", get(authors::update_form).post(authors::update))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete))
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/update", get(books::update_form).post(books::update))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        // Book instances
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        );

    Router::new()
        .route("/", get(home::root))
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .layer(middleware::map_response_with_state(state.clone(), error_layout))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
