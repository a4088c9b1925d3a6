use axum::{debug_handler, extract::State, response::Html};
use tower_sessions::Session;

use crate::catalog::{self, Catalog};
use crate::{AppResult, include_res, session};

#[debug_handler]
pub async fn index(State(catalog): State<Catalog>, session: Session) -> AppResult<Html<String>> {
    let featured_servers: String = catalog
        .servers()
        .iter()
        .filter(|s| s.featured)
        .take(6)
        .map(catalog::server_card)
        .collect();
    let featured_skills: String = catalog
        .skills()
        .iter()
        .filter(|s| s.featured)
        .take(3)
        .map(catalog::skill_card)
        .collect();

    let nav_auth = match session::current_principal(&session).await? {
        Some(principal) => {
            let who = principal.display_name.unwrap_or(principal.id);
            format!(
                "<a href=\"/collections\">My Collections</a> <a href=\"/logout\">Sign out ({who})</a>"
            )
        }
        None => "<a href=\"/login\">Sign in</a>".to_string(),
    };

    let body = include_res!(str, "/pages/index.html")
        .replace("{server_count}", &catalog.servers().len().to_string())
        .replace("{skill_count}", &catalog.skills().len().to_string())
        .replace("{featured_servers}", &featured_servers)
        .replace("{featured_skills}", &featured_skills)
        .replace("{nav_auth}", &nav_auth);

    Ok(Html(body))
}
