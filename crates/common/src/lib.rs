//! Nimbus Provider Common Library
//!
//! Shared error taxonomy and field-value vocabulary used by the API client
//! and the resource lifecycle controllers.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{FieldType, TagMap, Value};

/// Nimbus provider version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
