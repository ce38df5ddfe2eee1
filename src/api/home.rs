//! Site root and catalog home page

use axum::{extract::State, response::Html, response::Response};
use serde_json::json;

use super::found;
use crate::{error::AppResult, AppState};

pub async fn root() -> Response {
    found("/catalog")
}

/// Home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let data = state.services.catalog.summary().await?;
    state.views.render(
        "index.html",
        json!({ "title": "Local Library Home", "data": data }),
    )
}
