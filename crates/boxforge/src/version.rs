//! Build and version metadata for the boxforge CLI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version and build metadata reported by `boxforge version`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version from the crate manifest
    pub version: String,

    /// Short git commit SHA, when built from a checkout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    /// Date the binary was compiled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,

    /// Target triple the binary was compiled for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl VersionInfo {
    /// Metadata captured at compile time by the build script
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boxforge {}", self.version)?;
        if let Some(commit) = &self.commit {
            write!(f, " ({commit})")?;
        }
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        Ok(())
    }
}
