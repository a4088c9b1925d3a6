mod entry;
mod page;

use std::sync::Arc;

use axum::{Router, routing::get};

pub use entry::{ItemType, McpServer, Skill, category_label};
pub(crate) use page::{server_card, skill_card};

use crate::{AppResult, AppState, include_res};

/// Immutable reference data, loaded once at startup from the embedded
/// JSON under res/data/. Entries are never created or mutated at runtime.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogData>,
}

struct CatalogData {
    servers: Vec<McpServer>,
    skills: Vec<Skill>,
}

impl Catalog {
    pub fn load() -> AppResult<Catalog> {
        let servers: Vec<McpServer> = serde_json::from_str(include_res!(str, "/data/servers.json"))?;
        let skills: Vec<Skill> = serde_json::from_str(include_res!(str, "/data/skills.json"))?;

        Ok(Catalog {
            inner: Arc::new(CatalogData { servers, skills }),
        })
    }

    pub fn servers(&self) -> &[McpServer] {
        &self.inner.servers
    }

    pub fn skills(&self) -> &[Skill] {
        &self.inner.skills
    }

    pub fn server_by_slug(&self, slug: &str) -> Option<&McpServer> {
        self.inner.servers.iter().find(|s| s.slug == slug)
    }

    pub fn skill_by_slug(&self, slug: &str) -> Option<&Skill> {
        self.inner.skills.iter().find(|s| s.slug == slug)
    }

    /// Read-only lookup used to drop stale memberships at view time.
    pub fn resolves(&self, slug: &str, item_type: ItemType) -> bool {
        match item_type {
            ItemType::Server => self.server_by_slug(slug).is_some(),
            ItemType::Skill => self.skill_by_slug(slug).is_some(),
        }
    }

    pub fn server_categories(&self) -> Vec<&str> {
        dedup_categories(self.inner.servers.iter().map(|s| s.category.as_str()))
    }

    pub fn skill_categories(&self) -> Vec<&str> {
        dedup_categories(self.inner.skills.iter().map(|s| s.category.as_str()))
    }
}

fn dedup_categories<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for category in categories {
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/servers", get(page::servers_index))
        .route("/servers/{slug}", get(page::server_page))
        .route("/skills", get(page::skills_index))
        .route("/skills/{slug}", get(page::skill_page))
}
