//! CLI command implementations

pub mod build;
pub mod completions;
pub mod config;
pub mod destroy;
pub mod doctor;
pub mod halt;
pub mod scaffold;
pub mod ssh;
pub mod status;
pub mod up;
pub mod validate;
pub mod version;
