//! Writing rendered workspace files to disk

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A rendered workspace file, ready to be written
#[derive(Debug, Clone)]
pub struct ScaffoldFile {
    /// Output path relative to the workspace root
    pub relative_path: String,
    /// Rendered file contents
    pub contents: String,
    /// Whether the file gets the executable bit on unix
    pub executable: bool,
}

/// Write rendered files under `dir`, creating parent directories as needed.
///
/// Without `force`, existing files are an error. All target paths are
/// checked before the first write, so a collision never leaves a
/// half-written workspace behind.
pub fn write_workspace(dir: &Path, files: &[ScaffoldFile], force: bool) -> Result<Vec<PathBuf>> {
    if !force {
        for file in files {
            let target = dir.join(&file.relative_path);
            if target.exists() {
                bail!(
                    "{} already exists (pass --force to overwrite)",
                    target.display()
                );
            }
        }
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = dir.join(&file.relative_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, &file.contents)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        if file.executable {
            set_executable(&target)?;
        }
        debug!("Wrote {}", target.display());
        written.push(target);
    }

    Ok(written)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
