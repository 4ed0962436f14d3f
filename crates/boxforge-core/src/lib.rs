//! # boxforge-core
//!
//! Shared foundation for the boxforge CLI: the boxforge.yaml document
//! model, its loader, schema validation, and the starter-config template.

pub mod config;
pub mod error;
pub mod schema;
pub mod templates;
pub mod types;

pub use config::{generate_config, ForgeConfig};
pub use error::{Error, Result};
pub use schema::SchemaValidator;
