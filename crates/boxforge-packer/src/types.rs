//! Build options, results, and prerequisite reporting

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Options controlling a `packer build` run
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Pass -force so packer replaces existing artifacts
    pub force: bool,

    /// Stream verbose packer logs (PACKER_LOG=1)
    pub debug: bool,

    /// Skip `packer validate` between init and build
    pub skip_validation: bool,

    /// Extra -var-file arguments
    pub var_files: Vec<PathBuf>,

    /// Extra -var key=value arguments
    pub variables: HashMap<String, String>,

    /// What packer does with a half-built VM when a step fails
    pub on_error: OnErrorBehavior,
}

/// Packer's -on-error cleanup behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnErrorBehavior {
    /// Clean up the partial VM (packer's default)
    #[default]
    Cleanup,
    /// Stop without cleanup, leaving the VM for inspection
    Abort,
    /// Prompt interactively on failure
    Ask,
}

impl OnErrorBehavior {
    /// Value passed to packer's -on-error flag
    pub fn as_packer_flag(&self) -> &'static str {
        match self {
            OnErrorBehavior::Cleanup => "cleanup",
            OnErrorBehavior::Abort => "abort",
            OnErrorBehavior::Ask => "ask",
        }
    }
}

impl std::fmt::Display for OnErrorBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_packer_flag())
    }
}

impl std::str::FromStr for OnErrorBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cleanup" => Ok(OnErrorBehavior::Cleanup),
            "abort" => Ok(OnErrorBehavior::Abort),
            "ask" => Ok(OnErrorBehavior::Ask),
            _ => Err(format!(
                "Unknown on-error behavior: {}. Valid values: cleanup, abort, ask",
                s
            )),
        }
    }
}

/// JSON carries `build_time` as whole seconds
mod duration_secs {
    use serde::de::{Deserialize, Deserializer};
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Outcome of a packer build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResult {
    /// Whether packer exited successfully
    pub success: bool,

    /// File name of the box artifact (e.g. "dev-box.box")
    pub box_name: String,

    /// Path of the produced .box file
    pub box_path: PathBuf,

    /// Wall-clock build duration
    #[serde(with = "duration_secs")]
    pub build_time: Duration,

    /// Exit code packer returned, when it ran to completion
    pub exit_code: Option<i32>,
}

/// Outcome of `packer validate`
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the rendered template passed validation
    pub valid: bool,

    /// Validation errors reported by packer
    pub errors: Vec<String>,

    /// Non-fatal warnings reported by packer
    pub warnings: Vec<String>,
}

/// Presence and versions of the external tools a build-and-boot flow needs
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteStatus {
    pub packer_version: Option<String>,
    pub vagrant_version: Option<String>,
    pub parallels_version: Option<String>,

    /// Names of missing tools
    pub missing: Vec<String>,

    /// Install hints, one per missing tool
    pub hints: Vec<String>,

    /// True when nothing is missing
    pub satisfied: bool,
}

impl PrerequisiteStatus {
    /// packer is the one tool `build` cannot start without
    pub fn packer_installed(&self) -> bool {
        self.packer_version.is_some()
    }

    /// vagrant gates the checks that shell out to it
    pub fn vagrant_installed(&self) -> bool {
        self.vagrant_version.is_some()
    }
}
