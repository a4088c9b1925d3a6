mod clients;
mod lockin;
mod login;
mod logout;

use axum::{Router, routing::get};

pub use clients::{ClientProvider, Clients};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page))
        .route("/login/{provider}", get(login::login))
        .route("/lockin/{provider}", get(lockin::lockin))
        .route("/logout", get(logout::logout))
}
