//! HTTP client for the Cloud Foundry API.

use super::types::{PasswordGrant, RootInfo, TokenResponse};
use crate::groups::{v2, v3, SecurityGroup};
use crate::utils::config::{CF_OAUTH_CLIENT, CF_PAGE_SIZE, DEFAULT_HTTP_TIMEOUT};
use crate::utils::error::UpstreamError;
use crate::utils::http::parse_json;
use clap::ValueEnum;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

/// Which security group endpoint to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CfApiVersion {
    V2,
    #[default]
    V3,
}

/// Connection settings for the CF API
#[derive(Debug, Clone)]
pub struct CfConfig {
    /// API base, e.g. `https://api.sys.example.com`
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub api_version: CfApiVersion,
    pub skip_ssl_validation: bool,
}

/// Authenticated CF API client
pub struct CfClient {
    client: Client,
    api_url: String,
    api_version: CfApiVersion,
    token: String,
}

impl CfClient {
    /// Create a client and log in with the password grant
    pub fn connect(config: &CfConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .build()?;

        let api_url = config.api_url.trim_end_matches('/').to_string();
        let token = login(&client, &api_url, &config.username, &config.password)?;

        Ok(Self {
            client,
            api_url,
            api_version: config.api_version,
            token,
        })
    }

    /// Fetch every security group, following pagination
    pub fn list_security_groups(&self) -> Result<Vec<SecurityGroup>, UpstreamError> {
        let groups = match self.api_version {
            CfApiVersion::V2 => self.list_v2()?,
            CfApiVersion::V3 => self.list_v3()?,
        };
        info!("Fetched {} security groups", groups.len());
        Ok(groups)
    }

    fn list_v2(&self) -> Result<Vec<SecurityGroup>, UpstreamError> {
        let mut groups = Vec::new();
        let mut next = Some(format!(
            "/v2/security_groups?inline-relations-depth=1&page=1&results-per-page={}",
            CF_PAGE_SIZE
        ));

        while let Some(path) = next {
            let page: v2::SecurityGroupPage = self.get(&format!("{}{}", self.api_url, path))?;
            groups.extend(page.resources.into_iter().map(SecurityGroup::from));
            next = page.next_url;
        }

        Ok(groups)
    }

    fn list_v3(&self) -> Result<Vec<SecurityGroup>, UpstreamError> {
        let mut groups = Vec::new();
        let mut next = Some(format!(
            "{}/v3/security_groups?page=1&per_page={}",
            self.api_url, CF_PAGE_SIZE
        ));

        while let Some(url) = next {
            let page: v3::SecurityGroupPage = self.get(&url)?;
            groups.extend(page.resources.into_iter().map(SecurityGroup::from));
            next = page.pagination.next.map(|link| link.href);
        }

        Ok(groups)
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        debug!("GET {}", url);
        let response = self.client.get(url).bearer_auth(&self.token).send()?;
        parse_json(response, url)
    }
}

/// Resolve the token endpoint and exchange credentials for a bearer token
fn login(client: &Client, api_url: &str, username: &str, password: &str) -> Result<String, UpstreamError> {
    let root_url = format!("{}/", api_url);
    let root: RootInfo = parse_json(client.get(&root_url).send()?, &root_url)?;

    let token_url = root
        .token_endpoint()
        .map(|base| format!("{}/oauth/token", base))
        .ok_or_else(|| UpstreamError::InvalidResponse {
            endpoint: root_url.clone(),
            message: "no login or uaa link".to_string(),
        })?;

    info!("Authenticating as {} against {}", username, token_url);

    let response = client
        .post(&token_url)
        .basic_auth(CF_OAUTH_CLIENT, Some(""))
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&PasswordGrant {
            grant_type: "password",
            username,
            password,
        })
        .send()?;

    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(UpstreamError::AuthenticationFailed(format!(
            "credentials for {} were rejected",
            username
        )));
    }

    let token: TokenResponse = parse_json(response, &token_url)?;
    debug!("Received {} token", token.token_type.as_deref().unwrap_or("bearer"));
    Ok(token.access_token)
}
