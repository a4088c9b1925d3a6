use std::fmt;

use oauth2::{AuthUrl, Client, ClientId, ClientSecret, RedirectUrl, TokenUrl, basic::BasicClient};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppError, AppResult, GetField};

type HappyClient = Client<oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>, oauth2::StandardTokenResponse<oauth2::EmptyExtraTokenFields, oauth2::basic::BasicTokenType>, oauth2::StandardTokenIntrospectionResponse<oauth2::EmptyExtraTokenFields, oauth2::basic::BasicTokenType>, oauth2::StandardRevocableToken, oauth2::StandardErrorResponse<oauth2::RevocationErrorResponseType>, oauth2::EndpointSet, oauth2::EndpointNotSet, oauth2::EndpointNotSet, oauth2::EndpointNotSet, oauth2::EndpointSet>;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientProvider {
    Google,
    Github,
}

impl ClientProvider {
    /// Config key, redirect path segment, and principal id namespace.
    pub fn key(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "google",
            Github => "github",
        }
    }

    fn auth_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://accounts.google.com/o/oauth2/auth",
            Github => "https://github.com/login/oauth/authorize",
        }
    }

    fn token_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://oauth2.googleapis.com/token",
            Github => "https://github.com/login/oauth/access_token",
        }
    }

    pub(crate) fn userinfo_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://www.googleapis.com/oauth2/v2/userinfo",
            Github => "https://api.github.com/user",
        }
    }

    pub(crate) fn scope(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "openid",
            Github => "read:user",
        }
    }
}

impl fmt::Display for ClientProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone)]
pub struct Clients {
    google_client: Option<HappyClient>,
    github_client: Option<HappyClient>,
}

impl Clients {
    /// Reads the client-secret JSON from disk. A missing file disables
    /// sign-in but leaves the rest of the site browsable.
    pub fn load(path: &str) -> AppResult<Clients> {
        if !std::path::Path::new(path).exists() {
            tracing::warn!(path, "oauth client secrets not found, sign-in disabled");
            return Ok(Clients {
                google_client: None,
                github_client: None,
            });
        }

        Clients::from_json(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn from_json(json: Value) -> AppResult<Clients> {
        let origin = json
            .get("origin")
            .and_then(Value::as_str)
            .unwrap_or("http://localhost:8080")
            .to_owned();

        Ok(Clients {
            google_client: build_client(&json, ClientProvider::Google, &origin)?,
            github_client: build_client(&json, ClientProvider::Github, &origin)?,
        })
    }

    pub fn get_client(&self, provider: ClientProvider) -> AppResult<HappyClient> {
        use ClientProvider::*;
        match provider {
            Google => self.google_client.clone(),
            Github => self.github_client.clone(),
        }
        .ok_or_else(|| AppError::msg(format!("OAuth provider {provider} keys not supplied")))
    }
}

fn build_client(
    json: &Value,
    provider: ClientProvider,
    origin: &str,
) -> AppResult<Option<HappyClient>> {
    let Some(json) = json.get(provider.key()) else {
        return Ok(None);
    };

    let client_id = ClientId::new(json.get_str_field("client_id")?);
    let client_secret = ClientSecret::new(json.get_str_field("client_secret")?);

    let auth_url = AuthUrl::new(provider.auth_url().to_owned())?;
    let token_url = TokenUrl::new(provider.token_url().to_owned())?;
    let redirect_url = RedirectUrl::new(format!("{origin}/lockin/{}", provider.key()))?;

    Ok(Some(
        BasicClient::new(client_id)
            .set_client_secret(client_secret)
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url),
    ))
}
