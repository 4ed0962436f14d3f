//! Shared helpers for boxforge-packer integration tests

pub mod assertions;

#[allow(unused_imports)]
pub use assertions::*;

use boxforge_core::types::{ForgeConfigFile, UbuntuSeries};
use boxforge_core::ForgeConfig;
use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Default config file for rendering tests
pub fn sample_config(name: &str) -> ForgeConfigFile {
    ForgeConfig::new_default(name, UbuntuSeries::Noble)
}

/// A loaded config anchored in a temp directory, as if boxforge.yaml sat at
/// the temp dir root
#[allow(dead_code)]
pub fn config_in(dir: &TempDir, name: &str) -> ForgeConfig {
    let working_dir =
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8");
    ForgeConfig {
        config: sample_config(name),
        config_path: working_dir.join("boxforge.yaml"),
        working_dir,
    }
}

/// Install a scripted stand-in for an external CLI into `dir`.
///
/// The script appends its argument string to `<name>.log` beside itself,
/// then answers with the first matching `(pattern, stdout, exit code)` row.
/// Rows match as substrings of the full argument string, so "init" catches
/// `packer init .`. Unmatched invocations exit 0 silently.
///
/// The script re-adds /usr/bin and /bin to its own PATH, so it keeps working
/// when a test strips PATH down to just `dir`.
#[allow(dead_code)]
pub fn install_fake_cli(
    dir: &std::path::Path,
    name: &str,
    responses: &[(&str, &str, i32)],
) -> std::io::Result<()> {
    let script_path = dir.join(name);
    let log_path = dir.join(format!("{name}.log"));

    let mut script = format!(
        "#!/bin/sh\nPATH=\"/usr/bin:/bin:$PATH\"\necho \"$*\" >> \"{}\"\nARGS=\"$*\"\n",
        log_path.display()
    );

    for (i, (pattern, stdout, exit_code)) in responses.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elif" };
        script.push_str(&format!(
            "{keyword} echo \"$ARGS\" | grep -qF -- '{pattern}'; then\n  \
             cat <<'FAKE_OUT_{i}'\n{stdout}\nFAKE_OUT_{i}\n  exit {exit_code}\n"
        ));
    }
    if responses.is_empty() {
        script.push_str("exit 0\n");
    } else {
        script.push_str("else\n  exit 0\nfi\n");
    }

    std::fs::write(&script_path, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

/// Argument strings the fake CLI was invoked with, in order
#[allow(dead_code)]
pub fn fake_cli_log(dir: &std::path::Path, name: &str) -> Vec<String> {
    let log_path = dir.join(format!("{name}.log"));
    std::fs::read_to_string(log_path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
