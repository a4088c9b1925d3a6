mod page;
pub mod posts;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/{slug}", get(page::post))
}
