use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, session};

use super::model::{ItemKey, NewCollection};
use super::service;

#[debug_handler]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let principal = session::current_principal(&session).await?;
    let collections = service::list_collections(&db_pool, principal.as_ref()).await?;

    Ok(Json(json!({ "collections": collections })))
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(input): Json<NewCollection>,
) -> AppResult<impl IntoResponse> {
    let principal = session::current_principal(&session).await?;
    let collection = service::create_collection(&db_pool, principal.as_ref(), input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "collection": collection }))))
}

#[debug_handler]
pub(crate) async fn add_item(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(input): Json<ItemKey>,
) -> AppResult<impl IntoResponse> {
    let principal = session::current_principal(&session).await?;
    let item = service::add_item(&db_pool, principal.as_ref(), input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

#[debug_handler]
pub(crate) async fn remove_item(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(input): Json<ItemKey>,
) -> AppResult<impl IntoResponse> {
    let principal = session::current_principal(&session).await?;
    service::remove_item(&db_pool, principal.as_ref(), input).await?;

    Ok(Json(json!({ "ok": true })))
}

#[debug_handler]
pub(crate) async fn delete(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let principal = session::current_principal(&session).await?;
    service::delete_collection(&db_pool, principal.as_ref(), &id).await?;

    Ok(Json(json!({ "ok": true })))
}
