use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::AppResult;

pub const USER_ID: &str = "user_id";
pub const DISPLAY_NAME: &str = "display_name";
pub const CSRF_STATE: &str = "csrf_state";
pub const PKCE_VERIFIER: &str = "pkce_verifier";
pub const RETURN_URL: &str = "return_url";

/// The authenticated identity, opaque beyond its stable id.
/// `display_name` is presentation-only and never consulted by access checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Principal {
            id: id.into(),
            display_name: None,
        }
    }
}

pub async fn current_principal(session: &Session) -> AppResult<Option<Principal>> {
    let Some(id) = session.get::<String>(USER_ID).await? else {
        return Ok(None);
    };

    Ok(Some(Principal {
        id,
        display_name: session.get::<String>(DISPLAY_NAME).await?,
    }))
}
