use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Something bad happened while fetching all todo items: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Something bad happened while serializing todo items: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "Request failed");

        let error_response = json!({
            "status": "fail",
            "message": self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}
