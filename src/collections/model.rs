use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::{McpServer, Skill};

/// A named, owned, visibility-scoped list of catalog entries.
/// `owner_id` and `created_at` never change after the insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Collection {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: String,
}

/// Membership edge between a collection and one catalog entry,
/// uniquely keyed by (collection_id, item_slug, item_type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CollectionItem {
    pub collection_id: String,
    pub item_slug: String,
    pub item_type: String,
    pub added_at: String,
}

/// List row with per-type counts computed by the storage layer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CollectionSummary {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: String,
    pub server_count: i64,
    pub skill_count: i64,
}

/// A collection with its members resolved against the catalog.
/// Memberships whose slug no longer resolves are dropped.
#[derive(Debug, Serialize)]
pub struct CollectionView {
    #[serde(flatten)]
    pub collection: Collection,
    pub servers: Vec<McpServer>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
pub struct NewCollection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ItemKey {
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub item_slug: String,
    #[serde(default)]
    pub item_type: String,
}
