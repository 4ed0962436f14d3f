//! Vagrant process helpers

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, warn};

/// Error unless vagrant is on PATH
pub fn ensure_vagrant() -> Result<()> {
    if which::which("vagrant").is_err() {
        bail!("Vagrant is not installed or not on PATH. Install it with: brew install --cask vagrant");
    }
    Ok(())
}

/// Run a vagrant subcommand with captured output
pub(crate) async fn vagrant_output(args: &[&str], cwd: Option<&Path>) -> Result<Output> {
    let mut cmd = Command::new("vagrant");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
        debug!("Running: vagrant {} in {}", args.join(" "), dir.display());
    } else {
        debug!("Running: vagrant {}", args.join(" "));
    }

    let output = cmd.output().await.context("Failed to run vagrant")?;

    if !output.status.success() {
        warn!(
            "vagrant {} failed: {}",
            args.first().unwrap_or(&""),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(output)
}

/// Whether the vagrant-parallels provider plugin is installed
pub async fn parallels_plugin_installed() -> Result<bool> {
    ensure_vagrant()?;

    let output = vagrant_output(&["plugin", "list"], None).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    Ok(parse_plugin_names(&stdout)
        .iter()
        .any(|name| name == "vagrant-parallels"))
}

// Plugin rows look like "vagrant-parallels (2.4.3, global)"; other lines
// ("No plugins installed.", update notices) carry no trailing parenthesis.
fn parse_plugin_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || !line.ends_with(')') {
                return None;
            }
            line.split_whitespace().next().map(str::to_string)
        })
        .collect()
}
