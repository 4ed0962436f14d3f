//! Loading, validating, and persisting boxforge.yaml

mod loader;

pub use loader::{generate_config, ForgeConfig};
