//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while expanding a port expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("Port {port} was invalid")]
    InvalidPort { port: String },

    #[error("{}", describe_range(.range, .bound))]
    InvalidRange {
        /// The whole range token, e.g. `9-6`
        range: String,
        /// The sub-token that failed to parse, if any
        bound: Option<String>,
    },
}

impl PortError {
    /// The token the error refers to
    pub fn token(&self) -> &str {
        match self {
            PortError::InvalidPort { port } => port,
            PortError::InvalidRange { range, .. } => range,
        }
    }
}

fn describe_range(range: &str, bound: &Option<String>) -> String {
    match bound {
        Some(bound) => format!("Port {} was invalid as part of range {}", bound, range),
        None => format!("Port range {} was invalid", range),
    }
}

/// Errors that can occur while talking to the CF API or the BOSH director
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Errors that can occur during policy file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize YAML: {0}")]
    SerializationFailed(#[from] serde_yml::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_messages() {
        let scalar = PortError::InvalidPort { port: "0".to_string() };
        assert_eq!(scalar.to_string(), "Port 0 was invalid");

        let bound = PortError::InvalidRange {
            range: "#-7".to_string(),
            bound: Some("#".to_string()),
        };
        assert_eq!(bound.to_string(), "Port # was invalid as part of range #-7");

        let shape = PortError::InvalidRange {
            range: "9-6".to_string(),
            bound: None,
        };
        assert_eq!(shape.to_string(), "Port range 9-6 was invalid");
        assert_eq!(shape.token(), "9-6");
    }
}
