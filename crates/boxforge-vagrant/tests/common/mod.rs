//! Shared helpers for boxforge-vagrant integration tests

/// Install a scripted stand-in for the vagrant CLI into `dir`.
///
/// The script appends its argument string to `<name>.log` beside itself,
/// then answers with the first matching `(pattern, stdout, exit code)` row.
/// Rows match as substrings of the full argument string, so "box list"
/// catches `vagrant box list --machine-readable`. Unmatched invocations
/// exit 0 silently.
#[allow(dead_code)]
pub fn install_fake_cli(
    dir: &std::path::Path,
    name: &str,
    responses: &[(&str, &str, i32)],
) -> std::io::Result<()> {
    let script_path = dir.join(name);
    let log_path = dir.join(format!("{name}.log"));

    let mut script = format!(
        "#!/bin/sh\necho \"$*\" >> \"{}\"\nARGS=\"$*\"\n",
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
