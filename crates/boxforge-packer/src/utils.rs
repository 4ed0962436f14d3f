//! External tool discovery and short-lived packer invocations

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::templates::TEMPLATE_FILE;
use crate::types::PrerequisiteStatus;

/// Check if packer is installed, returning its version
pub fn check_packer_installed() -> Option<String> {
    which::which("packer").ok()?;

    let output = std::process::Command::new("packer")
        .arg("--version")
        .output()
        .ok()?;

    if output.status.success() {
        parse_packer_version(&output.stdout)
    } else {
        None
    }
}

/// Check if an arbitrary CLI tool is installed, returning its version line
pub fn check_cli_installed(cli: &str, version_args: &[&str]) -> Option<String> {
    which::which(cli).ok()?;

    let output = std::process::Command::new(cli)
        .args(version_args)
        .output()
        .ok()?;

    if output.status.success() {
        let version = String::from_utf8_lossy(&output.stdout);
        version.lines().next().map(|line| line.trim().to_string())
    } else {
        None
    }
}

/// Probe for every external tool the build-and-boot flow shells out to
pub fn check_prerequisites() -> PrerequisiteStatus {
    let mut status = PrerequisiteStatus {
        packer_version: check_packer_installed(),
        vagrant_version: check_cli_installed("vagrant", &["--version"]),
        parallels_version: check_cli_installed("prlctl", &["--version"]),
        ..Default::default()
    };

    if status.packer_version.is_none() {
        status.missing.push("packer".to_string());
        status
            .hints
            .push("Install packer: brew install packer".to_string());
    }
    if status.vagrant_version.is_none() {
        status.missing.push("vagrant".to_string());
        status
            .hints
            .push("Install vagrant: brew install --cask vagrant".to_string());
    }
    if status.parallels_version.is_none() {
        status.missing.push("prlctl".to_string());
        status.hints.push(
            "Install Parallels Desktop (Pro or Business Edition), which ships prlctl".to_string(),
        );
    }

    status.satisfied = status.missing.is_empty();
    status
}

/// Run `packer init` in the workspace directory, downloading the required
/// plugins declared by the template
pub async fn packer_init(workspace: &Path) -> Result<Output> {
    debug!("Running packer init in {}", workspace.display());

    let output = Command::new("packer")
        .args(["init", "."])
        .current_dir(workspace)
        .output()
        .await
        .context("Failed to run packer init")?;

    if !output.status.success() {
        warn!(
            "packer init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(output)
}

/// Run `packer validate` against the workspace template
pub async fn packer_validate(workspace: &Path, syntax_only: bool) -> Result<Output> {
    debug!("Running packer validate in {}", workspace.display());

    let mut cmd = Command::new("packer");
    cmd.arg("validate");
    if syntax_only {
        cmd.arg("-syntax-only");
    }
    cmd.arg(TEMPLATE_FILE);
    cmd.current_dir(workspace);

    let output = cmd
        .output()
        .await
        .context("Failed to run packer validate")?;

    if !output.status.success() {
        warn!(
            "packer validate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(output)
}

// Handles both "Packer v1.11.2" and the bare "1.8.7" older releases print,
// and drops the out-of-date notice packer appends after the version line.
fn parse_packer_version(stdout: &[u8]) -> Option<String> {
    let raw = String::from_utf8_lossy(stdout);
    let line = raw.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.replace("Packer v", ""))
}
