pub mod guard;
pub mod model;
pub mod service;

mod api;
mod page;
mod store;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/{id}", get(page::show))
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api::list).post(api::create))
        .route("/items", post(api::add_item).delete(api::remove_item))
        .route("/{id}", delete(api::delete))
}
