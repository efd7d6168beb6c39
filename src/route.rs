use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{handler::list_todos, AppState};

// No routes are registered: the fallback answers every method on every path
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app = Router::new()
        .fallback(list_todos)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());
    app
}
