use axum::{Form, debug_handler, extract::State, response::Redirect};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{AppResult, db};

#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub email: String,
}

/// Signing up twice with the same address is a no-op, same upsert idiom
/// as collection membership.
#[debug_handler]
pub async fn subscribe(
    State(db_pool): State<SqlitePool>,
    Form(NewsletterForm { email }): Form<NewsletterForm>,
) -> AppResult<Redirect> {
    if !email.contains('@') {
        return Ok(Redirect::to("/?newsletter=error"));
    }

    sqlx::query(
        "INSERT INTO newsletter_signups (email,created_at) VALUES (?,?)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(&email)
    .bind(db::now_rfc3339()?)
    .execute(&db_pool)
    .await?;

    Ok(Redirect::to("/?newsletter=success"))
}
