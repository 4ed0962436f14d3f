//! Vagrant box registry operations
//!
//! Boxes live in vagrant's global registry, not in a workspace, so these are
//! free functions rather than VagrantMachine methods.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use crate::utils::{ensure_vagrant, vagrant_output};

/// Whether a box with this name is already registered
pub async fn box_present(name: &str) -> Result<bool> {
    ensure_vagrant()?;

    let output = vagrant_output(&["box", "list", "--machine-readable"], None)
        .await
        .context("Failed to list vagrant boxes")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_box_names(&stdout).iter().any(|n| n == name))
}

/// Register a .box file under the given name, replacing any previous version
pub async fn box_add(name: &str, box_file: &Path) -> Result<()> {
    ensure_vagrant()?;

    if !box_file.is_file() {
        bail!(
            "Box file {} does not exist. Build it first: boxforge build",
            box_file.display()
        );
    }

    info!("Importing {} as box '{}'", box_file.display(), name);

    let file = box_file.to_string_lossy();
    let output = vagrant_output(&["box", "add", "--name", name, "--force", &file], None).await?;

    if !output.status.success() {
        bail!(
            "vagrant box add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}

/// Drop a box from the registry; VMs already created from it keep running
pub async fn box_remove(name: &str) -> Result<()> {
    ensure_vagrant()?;

    info!("Removing box '{}'", name);

    let output = vagrant_output(&["box", "remove", "--force", name], None).await?;

    if !output.status.success() {
        bail!(
            "vagrant box remove failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}

// Machine-readable rows are timestamp,target,type,data; box names carry no
// commas.
fn parse_box_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.splitn(4, ',').collect();
            if fields.len() >= 4 && fields[2] == "box-name" {
                Some(fields[3].trim().to_string())
            } else {
                None
            }
        })
        .collect()
}
