use axum::{
    debug_handler,
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::{AppError, AppResult, include_res};

use super::{Catalog, McpServer, Skill, category_label};

#[derive(Debug, Deserialize)]
pub(crate) struct BrowseQuery {
    category: Option<String>,
    sort: Option<String>,
}

#[debug_handler]
pub(crate) async fn servers_index(
    State(catalog): State<Catalog>,
    Query(BrowseQuery { category, sort }): Query<BrowseQuery>,
) -> AppResult<Html<String>> {
    let sort = sort.as_deref().unwrap_or("stars");

    let mut servers: Vec<McpServer> = catalog
        .servers()
        .iter()
        .filter(|s| category.as_deref().is_none_or(|c| s.category == c))
        .cloned()
        .collect();
    sort_servers(&mut servers, sort);

    let cards: String = servers.iter().map(server_card).collect();

    let body = include_res!(str, "/pages/servers/index.html")
        .replace("{count}", &servers.len().to_string())
        .replace("{categories}", &category_links("/servers", &catalog.server_categories(), category.as_deref()))
        .replace("{sorts}", &sort_links("/servers", &["stars", "name", "verified"], category.as_deref(), sort))
        .replace("{cards}", &cards);

    Ok(Html(body))
}

#[debug_handler]
pub(crate) async fn server_page(
    State(catalog): State<Catalog>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let server = catalog.server_by_slug(&slug).ok_or(AppError::NotFound)?;

    let related: String = catalog
        .servers()
        .iter()
        .filter(|s| s.category == server.category && s.slug != server.slug)
        .take(3)
        .map(server_card)
        .collect();

    let body = include_res!(str, "/pages/servers/server.html")
        .replace("{slug}", &server.slug)
        .replace("{name}", &server.name)
        .replace("{description}", &server.description)
        .replace("{category}", category_label(&server.category))
        .replace("{author}", &server.author)
        .replace("{repo}", &server.repo)
        .replace("{stars}", &server.stars.to_string())
        .replace("{verified}", verified_badge(server.verified))
        .replace("{related}", &related);

    Ok(Html(body))
}

#[debug_handler]
pub(crate) async fn skills_index(
    State(catalog): State<Catalog>,
    Query(BrowseQuery { category, sort }): Query<BrowseQuery>,
) -> AppResult<Html<String>> {
    let sort = sort.as_deref().unwrap_or("installs");

    let mut skills: Vec<Skill> = catalog
        .skills()
        .iter()
        .filter(|s| category.as_deref().is_none_or(|c| s.category == c))
        .cloned()
        .collect();
    sort_skills(&mut skills, sort);

    let cards: String = skills.iter().map(skill_card).collect();

    let body = include_res!(str, "/pages/skills/index.html")
        .replace("{count}", &skills.len().to_string())
        .replace("{categories}", &category_links("/skills", &catalog.skill_categories(), category.as_deref()))
        .replace("{sorts}", &sort_links("/skills", &["installs", "stars", "name"], category.as_deref(), sort))
        .replace("{cards}", &cards);

    Ok(Html(body))
}

#[debug_handler]
pub(crate) async fn skill_page(
    State(catalog): State<Catalog>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let skill = catalog.skill_by_slug(&slug).ok_or(AppError::NotFound)?;

    let body = include_res!(str, "/pages/skills/skill.html")
        .replace("{slug}", &skill.slug)
        .replace("{name}", &skill.name)
        .replace("{description}", &skill.description)
        .replace("{category}", category_label(&skill.category))
        .replace("{author}", &skill.author)
        .replace("{installs}", &skill.installs.to_string())
        .replace("{stars}", &skill.stars.to_string())
        .replace("{verified}", verified_badge(skill.verified))
        .replace("{install_cmd}", &format!("clawhub install {}", skill.slug));

    Ok(Html(body))
}

fn sort_servers(servers: &mut [McpServer], sort: &str) {
    match sort {
        "name" => servers.sort_by(|a, b| a.name.cmp(&b.name)),
        "verified" => servers.sort_by_key(|s| !s.verified),
        _ => servers.sort_by(|a, b| b.stars.cmp(&a.stars)),
    }
}

fn sort_skills(skills: &mut [Skill], sort: &str) {
    match sort {
        "name" => skills.sort_by(|a, b| a.name.cmp(&b.name)),
        "stars" => skills.sort_by(|a, b| b.stars.cmp(&a.stars)),
        _ => skills.sort_by(|a, b| b.installs.cmp(&a.installs)),
    }
}

pub(crate) fn server_card(server: &McpServer) -> String {
    include_res!(str, "/pages/servers/card.html")
        .replace("{slug}", &server.slug)
        .replace("{name}", &server.name)
        .replace("{description}", &server.description)
        .replace("{category}", category_label(&server.category))
        .replace("{stars}", &server.stars.to_string())
        .replace("{verified}", verified_badge(server.verified))
}

pub(crate) fn skill_card(skill: &Skill) -> String {
    include_res!(str, "/pages/skills/card.html")
        .replace("{slug}", &skill.slug)
        .replace("{name}", &skill.name)
        .replace("{description}", &skill.description)
        .replace("{category}", category_label(&skill.category))
        .replace("{installs}", &skill.installs.to_string())
        .replace("{verified}", verified_badge(skill.verified))
}

fn verified_badge(verified: bool) -> &'static str {
    if verified { "✓ verified" } else { "" }
}

fn category_links(base: &str, categories: &[&str], active: Option<&str>) -> String {
    let mut links = format!(
        "<a href=\"{base}\" class=\"{}\">All</a>",
        if active.is_none() { "active" } else { "" }
    );
    for category in categories {
        links += &format!(
            "<a href=\"{base}?category={category}\" class=\"{}\">{}</a>",
            if active == Some(category) { "active" } else { "" },
            category_label(category),
        );
    }
    links
}

fn sort_links(base: &str, sorts: &[&str], category: Option<&str>, active: &str) -> String {
    sorts
        .iter()
        .map(|sort| {
            let href = match category {
                Some(category) => format!("{base}?category={category}&sort={sort}"),
                None => format!("{base}?sort={sort}"),
            };
            format!(
                "<a href=\"{href}\" class=\"{}\">{sort}</a>",
                if *sort == active { "active" } else { "" },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(slug: &str, stars: u32, verified: bool) -> McpServer {
        McpServer {
            slug: slug.to_string(),
            name: slug.to_string(),
            description: String::new(),
            category: "dev-tools".to_string(),
            author: "test".to_string(),
            repo: String::new(),
            stars,
            verified,
            featured: false,
        }
    }

    #[test]
    fn default_sort_is_stars_descending() {
        let mut servers = vec![server("a", 10, false), server("b", 30, false), server("c", 20, false)];
        sort_servers(&mut servers, "stars");
        let order: Vec<&str> = servers.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn name_sort_is_alphabetical() {
        let mut servers = vec![server("c", 1, false), server("a", 2, false), server("b", 3, false)];
        sort_servers(&mut servers, "name");
        let order: Vec<&str> = servers.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn verified_sort_puts_verified_first() {
        let mut servers = vec![server("a", 50, false), server("b", 10, true)];
        sort_servers(&mut servers, "verified");
        assert_eq!(servers[0].slug, "b");
    }
}
