//! Nimbus API Client
//!
//! Typed client for the Nimbus cloud platform API. Lifecycle controllers
//! consume one capability trait per remote sub-resource category and never
//! talk HTTP directly; the [`HttpClient`] implements every trait against
//! the platform's JSON API.

pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod traits;
pub mod types;

pub use config::ApiConfig;
pub use error::entity_gone;
pub use http::HttpClient;
pub use params::*;
pub use traits::*;
pub use types::*;
