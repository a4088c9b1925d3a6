//! Orchestration point for every collection read and mutation. Each
//! operation resolves the target row, applies the ownership guard, and
//! only then touches storage, so no mutation can bypass the access rules.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::{Catalog, ItemType};
use crate::db;
use crate::session::Principal;
use crate::{AppError, AppResult};

use super::guard;
use super::model::{
    Collection, CollectionItem, CollectionSummary, CollectionView, ItemKey, NewCollection,
};
use super::store;

pub async fn create_collection(
    db_pool: &SqlitePool,
    principal: Option<&Principal>,
    input: NewCollection,
) -> AppResult<Collection> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;

    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name required"));
    }

    let collection = Collection {
        id: Uuid::now_v7().to_string(),
        owner_id: principal.id.clone(),
        name: name.to_string(),
        description: input.description,
        is_public: input.is_public.unwrap_or(false),
        created_at: db::now_rfc3339()?,
    };

    store::insert(db_pool, &collection).await?;
    tracing::info!(collection_id = %collection.id, owner_id = %collection.owner_id, "collection created");

    Ok(collection)
}

/// "My collections": owner-scoped, newest first, with per-type counts
/// computed by the storage layer.
pub async fn list_collections(
    db_pool: &SqlitePool,
    principal: Option<&Principal>,
) -> AppResult<Vec<CollectionSummary>> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;

    Ok(store::list_for_owner(db_pool, &principal.id).await?)
}

/// Access-checked read. A private collection that is not the requester's
/// own reports `NotFound`, indistinguishable from an id that never
/// existed. Members whose slug no longer resolves against the catalog are
/// dropped from the view.
pub async fn get_collection(
    db_pool: &SqlitePool,
    catalog: &Catalog,
    principal: Option<&Principal>,
    id: &str,
) -> AppResult<CollectionView> {
    let collection = store::get(db_pool, id).await?.ok_or(AppError::NotFound)?;
    if !guard::can_read(principal, &collection) {
        return Err(AppError::NotFound);
    }

    let mut servers = Vec::new();
    let mut skills = Vec::new();
    for item in store::items(db_pool, &collection.id).await? {
        match item.item_type.parse::<ItemType>() {
            Ok(ItemType::Server) => {
                if let Some(server) = catalog.server_by_slug(&item.item_slug) {
                    servers.push(server.clone());
                }
            }
            Ok(ItemType::Skill) => {
                if let Some(skill) = catalog.skill_by_slug(&item.item_slug) {
                    skills.push(skill.clone());
                }
            }
            Err(_) => {}
        }
    }

    Ok(CollectionView {
        collection,
        servers,
        skills,
    })
}

/// Idempotent upsert: adding a tuple that is already present succeeds and
/// returns the existing row, so a client-side toggle is safe to retry.
pub async fn add_item(
    db_pool: &SqlitePool,
    principal: Option<&Principal>,
    input: ItemKey,
) -> AppResult<CollectionItem> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;
    let (collection_id, item_slug, item_type) = validate_item_key(&input)?;

    let collection = store::get(db_pool, &collection_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !guard::can_mutate(Some(principal), &collection) {
        // Non-owners learn nothing about the collection's existence here.
        return Err(AppError::NotFound);
    }

    let item = CollectionItem {
        collection_id,
        item_slug,
        item_type: item_type.as_str().to_string(),
        added_at: db::now_rfc3339()?,
    };

    Ok(store::upsert_item(db_pool, &item).await?)
}

/// Removing an absent tuple is a no-op success.
pub async fn remove_item(
    db_pool: &SqlitePool,
    principal: Option<&Principal>,
    input: ItemKey,
) -> AppResult<()> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;
    let (collection_id, item_slug, item_type) = validate_item_key(&input)?;

    let collection = store::get(db_pool, &collection_id)
        .await?
        .ok_or(AppError::Forbidden)?;
    if !guard::can_mutate(Some(principal), &collection) {
        return Err(AppError::Forbidden);
    }

    store::delete_item(db_pool, &collection_id, &item_slug, item_type.as_str()).await?;

    Ok(())
}

pub async fn delete_collection(
    db_pool: &SqlitePool,
    principal: Option<&Principal>,
    id: &str,
) -> AppResult<()> {
    let principal = principal.ok_or(AppError::Unauthenticated)?;

    let collection = store::get(db_pool, id).await?.ok_or(AppError::NotFound)?;
    if !guard::can_mutate(Some(principal), &collection) {
        return Err(AppError::NotFound);
    }

    store::delete(db_pool, id).await?;
    tracing::info!(collection_id = %id, "collection deleted");

    Ok(())
}

fn validate_item_key(input: &ItemKey) -> AppResult<(String, String, ItemType)> {
    if input.collection_id.is_empty() {
        return Err(AppError::validation("collection_id required"));
    }
    if Uuid::parse_str(&input.collection_id).is_err() {
        return Err(AppError::validation("collection_id must be a uuid"));
    }
    if input.item_slug.is_empty() {
        return Err(AppError::validation("item_slug required"));
    }
    let item_type: ItemType = input.item_type.parse()?;

    Ok((input.collection_id.clone(), input.item_slug.clone(), item_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::store;

    const SERVER_SLUG: &str = "kubernetes-mcp";
    const SKILL_SLUG: &str = "code-review";

    // One connection: every :memory: connection is its own database.
    async fn setup() -> (SqlitePool, Catalog) {
        let db_pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::migrate(&db_pool).await.unwrap();
        (db_pool, Catalog::load().unwrap())
    }

    fn alice() -> Principal {
        Principal::new("github:1001")
    }

    fn bob() -> Principal {
        Principal::new("github:2002")
    }

    fn named(name: &str) -> NewCollection {
        NewCollection {
            name: name.to_string(),
            description: None,
            is_public: None,
        }
    }

    fn key(collection_id: &str, item_slug: &str, item_type: &str) -> ItemKey {
        ItemKey {
            collection_id: collection_id.to_string(),
            item_slug: item_slug.to_string(),
            item_type: item_type.to_string(),
        }
    }

    async fn item_count(db_pool: &SqlitePool, collection_id: &str) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM collection_items WHERE collection_id=?")
                .bind(collection_id)
                .fetch_one(db_pool)
                .await
                .unwrap();
        count
    }

    #[tokio::test]
    async fn create_requires_principal() {
        let (db_pool, _) = setup().await;

        let err = create_collection(&db_pool, None, named("DevOps")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let (db_pool, _) = setup().await;

        let err = create_collection(&db_pool, Some(&alice()), named("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_trims_name_and_listing_includes_it_once() {
        let (db_pool, _) = setup().await;
        let alice = alice();

        let created = create_collection(&db_pool, Some(&alice), named("  DevOps  "))
            .await
            .unwrap();
        assert_eq!(created.name, "DevOps");
        assert!(!created.is_public);
        assert_eq!(created.owner_id, alice.id);

        let listed = list_collections(&db_pool, Some(&alice)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "DevOps");
        assert_eq!(listed[0].server_count, 0);
        assert_eq!(listed[0].skill_count, 0);
    }

    #[tokio::test]
    async fn listing_is_owner_scoped_and_newest_first() {
        let (db_pool, _) = setup().await;
        let alice = alice();

        for (id, created_at) in [("older", "2026-01-01T00:00:00Z"), ("newer", "2026-02-01T00:00:00Z")] {
            store::insert(
                &db_pool,
                &Collection {
                    id: id.to_string(),
                    owner_id: alice.id.clone(),
                    name: id.to_string(),
                    description: None,
                    is_public: false,
                    created_at: created_at.to_string(),
                },
            )
            .await
            .unwrap();
        }
        create_collection(&db_pool, Some(&bob()), named("Not Alice's")).await.unwrap();

        let listed = list_collections(&db_pool, Some(&alice)).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["newer", "older"]);

        let err = list_collections(&db_pool, None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn add_item_is_idempotent() {
        let (db_pool, _) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("DevOps")).await.unwrap();

        let first = add_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();
        let second = add_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(item_count(&db_pool, &col.id).await, 1);
    }

    #[tokio::test]
    async fn add_item_validates_its_inputs() {
        let (db_pool, _) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("DevOps")).await.unwrap();

        for bad in [
            key("", SERVER_SLUG, "server"),
            key("not-a-uuid", SERVER_SLUG, "server"),
            key(&col.id, "", "server"),
            key(&col.id, SERVER_SLUG, "gadget"),
            key(&col.id, SERVER_SLUG, ""),
        ] {
            let err = add_item(&db_pool, Some(&alice), bad).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn add_item_requires_principal() {
        let (db_pool, _) = setup().await;
        let col = create_collection(&db_pool, Some(&alice()), named("DevOps")).await.unwrap();

        let err = add_item(&db_pool, None, key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn add_item_to_unknown_collection_is_not_found() {
        let (db_pool, _) = setup().await;

        let err = add_item(
            &db_pool,
            Some(&alice()),
            key(&Uuid::now_v7().to_string(), SERVER_SLUG, "server"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn add_item_by_non_owner_is_not_found_even_when_public() {
        let (db_pool, _) = setup().await;
        let col = create_collection(
            &db_pool,
            Some(&alice()),
            NewCollection {
                name: "Shared".to_string(),
                description: None,
                is_public: Some(true),
            },
        )
        .await
        .unwrap();

        let err = add_item(&db_pool, Some(&bob()), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn remove_item_on_absent_tuple_is_a_noop() {
        let (db_pool, _) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("DevOps")).await.unwrap();

        remove_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remove_item_by_non_owner_is_forbidden() {
        let (db_pool, _) = setup().await;
        let col = create_collection(&db_pool, Some(&alice()), named("DevOps")).await.unwrap();

        let err = remove_item(&db_pool, Some(&bob()), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        // A collection that never existed reports the same way.
        let err = remove_item(
            &db_pool,
            Some(&bob()),
            key(&Uuid::now_v7().to_string(), SERVER_SLUG, "server"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn add_then_remove_leaves_item_absent_from_view() {
        let (db_pool, catalog) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("DevOps")).await.unwrap();

        add_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();
        remove_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();

        let view = get_collection(&db_pool, &catalog, Some(&alice), &col.id)
            .await
            .unwrap();
        assert!(view.servers.is_empty());
        assert!(view.skills.is_empty());
        assert_eq!(item_count(&db_pool, &col.id).await, 0);
    }

    #[tokio::test]
    async fn private_collection_is_invisible_to_others() {
        let (db_pool, catalog) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("Secret")).await.unwrap();

        get_collection(&db_pool, &catalog, Some(&alice), &col.id)
            .await
            .unwrap();

        let err = get_collection(&db_pool, &catalog, Some(&bob()), &col.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let err = get_collection(&db_pool, &catalog, None, &col.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn public_collection_is_visible_to_everyone() {
        let (db_pool, catalog) = setup().await;
        let col = create_collection(
            &db_pool,
            Some(&alice()),
            NewCollection {
                name: "Shared".to_string(),
                description: Some("starter kit".to_string()),
                is_public: Some(true),
            },
        )
        .await
        .unwrap();

        let view = get_collection(&db_pool, &catalog, None, &col.id).await.unwrap();
        assert_eq!(view.collection.name, "Shared");

        get_collection(&db_pool, &catalog, Some(&bob()), &col.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_collection_is_not_found() {
        let (db_pool, catalog) = setup().await;

        let err = get_collection(&db_pool, &catalog, Some(&alice()), "no-such-id")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn stale_members_are_dropped_from_the_view() {
        let (db_pool, catalog) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("Mixed")).await.unwrap();

        add_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();
        add_item(&db_pool, Some(&alice), key(&col.id, SKILL_SLUG, "skill"))
            .await
            .unwrap();
        // A slug the catalog no longer carries stays in storage but is
        // filtered out of the resolved view.
        add_item(&db_pool, Some(&alice), key(&col.id, "ghost-server", "server"))
            .await
            .unwrap();

        let view = get_collection(&db_pool, &catalog, Some(&alice), &col.id)
            .await
            .unwrap();
        assert_eq!(view.servers.len(), 1);
        assert_eq!(view.servers[0].slug, SERVER_SLUG);
        assert_eq!(view.skills.len(), 1);
        assert_eq!(view.skills[0].slug, SKILL_SLUG);
        assert_eq!(item_count(&db_pool, &col.id).await, 3);
    }

    #[tokio::test]
    async fn delete_collection_cascades_to_items() {
        let (db_pool, catalog) = setup().await;
        let alice = alice();
        let col = create_collection(&db_pool, Some(&alice), named("DevOps")).await.unwrap();
        add_item(&db_pool, Some(&alice), key(&col.id, SERVER_SLUG, "server"))
            .await
            .unwrap();

        let err = delete_collection(&db_pool, Some(&bob()), &col.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        delete_collection(&db_pool, Some(&alice), &col.id).await.unwrap();

        let err = get_collection(&db_pool, &catalog, Some(&alice), &col.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(item_count(&db_pool, &col.id).await, 0);
    }
}
