//! Shared response handling for the CF and BOSH clients.

use crate::utils::error::UpstreamError;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;

/// Check the HTTP status and decode a JSON body
pub fn parse_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::InvalidResponse {
            endpoint: url.to_string(),
            message: format!("HTTP {}: {}", status, response.text().unwrap_or_default()),
        });
    }

    response.json().map_err(|e| UpstreamError::InvalidResponse {
        endpoint: url.to_string(),
        message: e.to_string(),
    })
}
