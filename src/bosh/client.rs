//! HTTP client for the BOSH director.

use super::types::{Deployment, Vm};
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::UpstreamError;
use crate::utils::http::parse_json;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

/// Connection settings for the director
#[derive(Debug, Clone)]
pub struct BoshConfig {
    /// Director URI including scheme, e.g. `https://10.0.0.6`
    pub uri: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub skip_ssl_validation: bool,
}

impl BoshConfig {
    /// `<uri>:<port>` without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.uri.trim_end_matches('/'), self.port)
    }
}

/// BOSH director client using basic auth
pub struct BoshClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl BoshClient {
    pub fn new(config: &BoshConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// List all deployments on the director
    pub fn deployments(&self) -> Result<Vec<Deployment>, UpstreamError> {
        let deployments: Vec<Deployment> = self.get("/deployments")?;
        info!("Director has {} deployments", deployments.len());
        Ok(deployments)
    }

    /// List the VMs of one deployment
    pub fn vms(&self, deployment: &str) -> Result<Vec<Vm>, UpstreamError> {
        let vms: Vec<Vm> = self.get(&format!("/deployments/{}/vms", deployment))?;
        info!("Deployment {} has {} VMs", deployment, vms.len());
        Ok(vms)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(UpstreamError::AuthenticationFailed(format!(
                "BOSH director rejected user {}",
                self.username
            )));
        }

        parse_json(response, &url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = BoshConfig {
            uri: "https://192.168.50.4/".to_string(),
            port: "25555".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            skip_ssl_validation: true,
        };
        assert_eq!(config.base_url(), "https://192.168.50.4:25555");
    }
}
