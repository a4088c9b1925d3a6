use axum::{
    debug_handler,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use oauth2::{AuthorizationCode, CsrfToken, PkceCodeVerifier, TokenResponse};
use serde::Deserialize;
use serde_json::Value;
use tower_sessions::Session;

use crate::session::{CSRF_STATE, DISPLAY_NAME, PKCE_VERIFIER, RETURN_URL, USER_ID};
use crate::{AppError, AppResult, AppState};

use super::{Clients, clients::ClientProvider};

#[derive(Deserialize)]
pub(crate) struct LockinQuery {
    pub(crate) state: Option<String>,
    pub(crate) code: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn lockin(
    Path(provider): Path<ClientProvider>,
    Query(LockinQuery { state, code }): Query<LockinQuery>,
    State(clients): State<Clients>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let state = CsrfToken::new(state.ok_or_else(|| AppError::msg("OAuth: without state"))?);
    let code = AuthorizationCode::new(code.ok_or_else(|| AppError::msg("OAuth: without code"))?);

    let Some(stored_state) = session.get::<String>(CSRF_STATE).await? else {
        return Err(AppError::msg("no csrf_state"));
    };
    if state.secret().as_str() != stored_state.as_str() {
        return Err(AppError::msg("csrf tokens don't match"));
    }

    let Some(pkce_verifier) = session.get::<String>(PKCE_VERIFIER).await? else {
        return Err(AppError::msg("no pkce_verifier"));
    };

    let client = clients.get_client(provider)?;
    let http_client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let token_result = client
        .exchange_code(code)
        .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
        .request_async(&http_client)
        .await?;

    let access_token = token_result.access_token().secret();
    let body: Value = http_client
        .get(provider.userinfo_url())
        .bearer_auth(access_token)
        .header(reqwest::header::USER_AGENT, "mcpskills")
        .send()
        .await?
        .json()
        .await?;

    // Namespace by provider so the two id spaces can never collide.
    let user_id = format!("{provider}:{}", provider_user_id(&body)?);
    session.insert(USER_ID, &user_id).await?;
    if let Some(name) = display_name(&body) {
        session.insert(DISPLAY_NAME, name).await?;
    }

    tracing::info!(%user_id, "signed in");

    let return_url: Option<String> = session.remove(RETURN_URL).await?;
    Ok(Redirect::to(return_url.as_deref().unwrap_or("/collections")))
}

// GitHub serves numeric ids, Google serves strings.
fn provider_user_id(body: &Value) -> AppResult<String> {
    match body.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(AppError::msg(format!("couldn't read id from userinfo {body}"))),
    }
}

fn display_name(body: &Value) -> Option<String> {
    ["name", "login"]
        .into_iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_accepts_strings_and_numbers() {
        assert_eq!(provider_user_id(&json!({ "id": "abc" })).unwrap(), "abc");
        assert_eq!(provider_user_id(&json!({ "id": 12345 })).unwrap(), "12345");
        assert!(provider_user_id(&json!({ "login": "x" })).is_err());
    }

    #[test]
    fn display_name_prefers_name_over_login() {
        let body = json!({ "name": "Ada", "login": "alovelace" });
        assert_eq!(display_name(&body).unwrap(), "Ada");
        assert_eq!(display_name(&json!({ "login": "alovelace" })).unwrap(), "alovelace");
        assert_eq!(display_name(&json!({})), None);
    }
}
