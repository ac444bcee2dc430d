//! Utility modules for configuration and error handling.

pub mod error;
pub mod config;
pub mod http;

// Re-export commonly used error types for convenience
pub use error::{PortError, UpstreamError, OutputError};
