pub mod auth;
pub mod blog;
pub mod catalog;
pub mod collections;
pub mod db;
pub mod error;
pub mod index;
pub mod newsletter;
pub mod res;
pub mod session;
pub mod submit;

use axum::extract::FromRef;
use serde_json::Value;
use sqlx::SqlitePool;

pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub clients: auth::Clients,
    pub catalog: catalog::Catalog,
}

pub trait GetField {
    fn get_str_field(&self, field: &str) -> AppResult<String>;
    fn get_obj_field(&self, field: &str) -> AppResult<&Value>;
}

impl GetField for serde_json::Value {
    fn get_str_field(&self, field: &str) -> AppResult<String> {
        Ok(
            self.get(field)
            .ok_or_else(|| AppError::msg(format!("expected {field} in {self}")))?
            .as_str()
            .ok_or_else(|| AppError::msg(format!("expected {field} in {self} to be string")))?
            .to_owned()
        )
    }

    fn get_obj_field(&self, field: &str) -> AppResult<&Value> {
        self.get(field)
        .ok_or_else(|| AppError::msg(format!("expected {field} in {self}")))
    }
}
