use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::catalog::{self, Catalog};
use crate::{AppResult, AppState, include_res, session};

use super::service;

#[debug_handler]
pub(crate) async fn index(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(principal) = session::current_principal(&session).await? else {
        return Ok(Redirect::to("/login?return_url=/collections").into_response());
    };

    let collections = service::list_collections(&db_pool, Some(&principal)).await?;

    let cards = if collections.is_empty() {
        include_res!(str, "/pages/collections/empty.html").to_string()
    } else {
        collections
            .iter()
            .map(|col| {
                include_res!(str, "/pages/collections/card.html")
                    .replace("{id}", &col.id)
                    .replace("{name}", &col.name)
                    .replace("{description}", col.description.as_deref().unwrap_or(""))
                    .replace("{visibility}", visibility_badge(col.is_public))
                    .replace("{server_count}", &col.server_count.to_string())
                    .replace("{skill_count}", &col.skill_count.to_string())
            })
            .collect()
    };

    let owner = principal.display_name.unwrap_or(principal.id);
    let body = include_res!(str, "/pages/collections/index.html")
        .replace("{owner}", &owner)
        .replace("{cards}", &cards);

    Ok(Html(body).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn show(
    State(db_pool): State<SqlitePool>,
    State(catalog): State<Catalog>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let principal = session::current_principal(&session).await?;
    let view = service::get_collection(&db_pool, &catalog, principal.as_ref(), &id).await?;

    let server_cards: String = view.servers.iter().map(catalog::server_card).collect();
    let skill_cards: String = view.skills.iter().map(catalog::skill_card).collect();

    let body = include_res!(str, "/pages/collections/collection.html")
        .replace("{name}", &view.collection.name)
        .replace("{description}", view.collection.description.as_deref().unwrap_or(""))
        .replace("{visibility}", visibility_badge(view.collection.is_public))
        .replace("{server_count}", &view.servers.len().to_string())
        .replace("{skill_count}", &view.skills.len().to_string())
        .replace("{server_cards}", &server_cards)
        .replace("{skill_cards}", &skill_cards);

    Ok(Html(body))
}

fn visibility_badge(is_public: bool) -> &'static str {
    if is_public { "Public" } else { "Private" }
}
