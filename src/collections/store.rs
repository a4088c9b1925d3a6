//! Storage adapter for collections and their membership rows. No business
//! rules live here beyond the composite-unique upsert; ownership and
//! visibility are the service's concern.

use sqlx::SqlitePool;

use super::model::{Collection, CollectionItem, CollectionSummary};

pub(crate) async fn insert(db_pool: &SqlitePool, collection: &Collection) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO collections (id,owner_id,name,description,is_public,created_at) VALUES (?,?,?,?,?,?)")
        .bind(&collection.id)
        .bind(&collection.owner_id)
        .bind(&collection.name)
        .bind(&collection.description)
        .bind(collection.is_public)
        .bind(&collection.created_at)
        .execute(db_pool)
        .await?;

    Ok(())
}

pub(crate) async fn get(db_pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Collection>> {
    sqlx::query_as::<_, Collection>(
        "SELECT id,owner_id,name,description,is_public,created_at FROM collections WHERE id=?",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await
}

pub(crate) async fn list_for_owner(
    db_pool: &SqlitePool,
    owner_id: &str,
) -> sqlx::Result<Vec<CollectionSummary>> {
    sqlx::query_as::<_, CollectionSummary>(
        "SELECT c.id, c.owner_id, c.name, c.description, c.is_public, c.created_at,
                COUNT(CASE WHEN i.item_type = 'server' THEN 1 END) AS server_count,
                COUNT(CASE WHEN i.item_type = 'skill' THEN 1 END) AS skill_count
         FROM collections c
         LEFT JOIN collection_items i ON i.collection_id = c.id
         WHERE c.owner_id = ?
         GROUP BY c.id
         ORDER BY c.created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(db_pool)
    .await
}

pub(crate) async fn items(
    db_pool: &SqlitePool,
    collection_id: &str,
) -> sqlx::Result<Vec<CollectionItem>> {
    sqlx::query_as::<_, CollectionItem>(
        "SELECT collection_id,item_slug,item_type,added_at FROM collection_items
         WHERE collection_id=? ORDER BY added_at",
    )
    .bind(collection_id)
    .fetch_all(db_pool)
    .await
}

/// Upsert on the composite key. A conflicting insert leaves the existing
/// row untouched, so two racing adds for the same tuple both succeed and
/// the tuple count stays at one.
pub(crate) async fn upsert_item(
    db_pool: &SqlitePool,
    item: &CollectionItem,
) -> sqlx::Result<CollectionItem> {
    sqlx::query(
        "INSERT INTO collection_items (collection_id,item_slug,item_type,added_at) VALUES (?,?,?,?)
         ON CONFLICT (collection_id,item_slug,item_type) DO NOTHING",
    )
    .bind(&item.collection_id)
    .bind(&item.item_slug)
    .bind(&item.item_type)
    .bind(&item.added_at)
    .execute(db_pool)
    .await?;

    sqlx::query_as::<_, CollectionItem>(
        "SELECT collection_id,item_slug,item_type,added_at FROM collection_items
         WHERE collection_id=? AND item_slug=? AND item_type=?",
    )
    .bind(&item.collection_id)
    .bind(&item.item_slug)
    .bind(&item.item_type)
    .fetch_one(db_pool)
    .await
}

pub(crate) async fn delete_item(
    db_pool: &SqlitePool,
    collection_id: &str,
    item_slug: &str,
    item_type: &str,
) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM collection_items WHERE collection_id=? AND item_slug=? AND item_type=?")
        .bind(collection_id)
        .bind(item_slug)
        .bind(item_type)
        .execute(db_pool)
        .await?;

    Ok(())
}

pub(crate) async fn delete(db_pool: &SqlitePool, id: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM collections WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;

    Ok(())
}
