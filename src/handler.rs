use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{HeaderName, CONTENT_TYPE},
        StatusCode,
    },
};

use crate::{db, error::AppError, AppState};

/// Handler for every request: all rows of `todos` as a JSON array.
///
/// The request itself is never looked at, so method, path, headers and
/// body make no difference to the response.
pub async fn list_todos(
    State(data): State<Arc<AppState>>,
) -> Result<(StatusCode, [(HeaderName, &'static str); 1], String), AppError> {
    let todos = db::fetch_todos(&data.db).await?;
    tracing::debug!(results = todos.len(), "Fetched todo items");

    let body = serde_json::to_string(&todos)?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body))
}
