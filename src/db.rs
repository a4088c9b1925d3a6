use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub const CREATE_COLLECTIONS: &str = "
CREATE TABLE IF NOT EXISTS collections (
    id          TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    is_public   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
)";

pub const CREATE_COLLECTION_ITEMS: &str = "
CREATE TABLE IF NOT EXISTS collection_items (
    collection_id TEXT NOT NULL,
    item_slug     TEXT NOT NULL,
    item_type     TEXT NOT NULL,
    added_at      TEXT NOT NULL,
    PRIMARY KEY (collection_id, item_slug, item_type),
    FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
)";

pub const CREATE_NEWSLETTER_SIGNUPS: &str = "
CREATE TABLE IF NOT EXISTS newsletter_signups (
    email      TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
)";

pub const CREATE_SUBMISSIONS: &str = "
CREATE TABLE IF NOT EXISTS submissions (
    id              TEXT PRIMARY KEY,
    github_url      TEXT NOT NULL,
    category        TEXT NOT NULL,
    description     TEXT NOT NULL,
    submitter_email TEXT,
    created_at      TEXT NOT NULL
)";

pub async fn connect(url: &str) -> sqlx::Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await
}

pub async fn migrate(db_pool: &SqlitePool) -> sqlx::Result<()> {
    for stmt in [
        CREATE_COLLECTIONS,
        CREATE_COLLECTION_ITEMS,
        CREATE_NEWSLETTER_SIGNUPS,
        CREATE_SUBMISSIONS,
    ] {
        sqlx::query(stmt).execute(db_pool).await?;
    }

    Ok(())
}

/// RFC 3339 timestamps stored as TEXT sort lexicographically in time order.
pub fn now_rfc3339() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}
