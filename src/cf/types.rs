//! Types for the Cloud Foundry root and UAA token endpoints.

use serde::Deserialize;

/// `GET /` on the CF API
#[derive(Debug, Deserialize)]
pub struct RootInfo {
    pub links: RootLinks,
}

#[derive(Debug, Deserialize)]
pub struct RootLinks {
    #[serde(default)]
    pub login: Option<Href>,

    #[serde(default)]
    pub uaa: Option<Href>,
}

#[derive(Debug, Deserialize)]
pub struct Href {
    pub href: String,
}

impl RootInfo {
    /// Base URL of the token issuer, preferring the login server
    pub fn token_endpoint(&self) -> Option<&str> {
        self.links
            .login
            .as_ref()
            .or(self.links.uaa.as_ref())
            .map(|link| link.href.trim_end_matches('/'))
    }
}

/// Password grant request sent to `/oauth/token`
#[derive(Debug, serde::Serialize)]
pub struct PasswordGrant<'a> {
    pub grant_type: &'static str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful `/oauth/token` response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,
}
