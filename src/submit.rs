use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppResult, db, include_res};

#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[debug_handler]
pub async fn submit_page() -> impl IntoResponse {
    Html(include_res!(str, "/pages/submit.html"))
}

#[debug_handler]
pub async fn submit(
    State(db_pool): State<SqlitePool>,
    Form(form): Form<SubmissionForm>,
) -> AppResult<Redirect> {
    if form.github_url.is_empty() || form.category.is_empty() || form.description.is_empty() {
        return Ok(Redirect::to("/submit?error=missing"));
    }

    sqlx::query(
        "INSERT INTO submissions (id,github_url,category,description,submitter_email,created_at) VALUES (?,?,?,?,?,?)",
    )
    .bind(Uuid::now_v7().to_string())
    .bind(&form.github_url)
    .bind(&form.category)
    .bind(&form.description)
    .bind(form.email.as_ref().filter(|e| !e.is_empty()))
    .bind(db::now_rfc3339()?)
    .execute(&db_pool)
    .await?;

    Ok(Redirect::to("/submit?success=1"))
}
