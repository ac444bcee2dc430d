//! Security groups and their upstream shapes.
//!
//! Each CF API version gets its own adapter that normalizes into
//! `SecurityGroup`, so the rule engine never sees API differences.

pub mod model;
pub mod selector;
pub mod v2;
pub mod v3;

// Re-export main types
pub use model::{SecurityGroup, UpstreamRule};
pub use selector::select_in_effect;
