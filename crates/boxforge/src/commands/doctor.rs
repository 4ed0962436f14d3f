//! Doctor command - check the host for the tools a build needs

use anyhow::{anyhow, Result};
use boxforge_packer::utils::{check_cli_installed, check_packer_installed};
use boxforge_vagrant::parallels_plugin_installed;
use owo_colors::OwoColorize;

use crate::cli::DoctorArgs;
use crate::output;

pub async fn run(args: DoctorArgs) -> Result<()> {
    // Each probe spawns a --version subprocess; run them concurrently and
    // keep the blocking spawns off the runtime
    let (packer, vagrant, prlctl) = tokio::join!(
        tokio::task::spawn_blocking(check_packer_installed),
        tokio::task::spawn_blocking(|| check_cli_installed("vagrant", &["--version"])),
        tokio::task::spawn_blocking(|| check_cli_installed("prlctl", &["--version"])),
    );
    let (packer, vagrant, prlctl) = (packer?, vagrant?, prlctl?);

    // The plugin check shells out to vagrant itself, so it stays sequential
    // and is skipped when vagrant is missing
    let plugin_ok = if vagrant.is_some() {
        parallels_plugin_installed().await.unwrap_or(false)
    } else {
        false
    };

    let mut missing: Vec<&str> = Vec::new();
    if packer.is_none() {
        missing.push("packer");
    }
    if vagrant.is_none() {
        missing.push("vagrant");
    }
    if prlctl.is_none() {
        missing.push("prlctl");
    }
    if !plugin_ok {
        missing.push("vagrant-parallels");
    }

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    let satisfied = missing.is_empty();

    if args.json {
        let json = serde_json::json!({
            "packer": packer,
            "vagrant": vagrant,
            "prlctl": prlctl,
            "vagrant_parallels_plugin": plugin_ok,
            "os": os,
            "arch": arch,
            "missing": missing,
            "satisfied": satisfied,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);

        if satisfied {
            return Ok(());
        }
        return Err(anyhow!("Missing required tools"));
    }

    output::header("Boxforge Prerequisites Check");

    if let Some(version) = &packer {
        output::success(&format!("Packer installed: {version}"));
    } else {
        output::error("Packer not installed");
        output::info("  Install: brew install packer");
    }

    if let Some(version) = &vagrant {
        output::success(&format!("Vagrant installed: {version}"));
    } else {
        output::error("Vagrant not installed");
        output::info("  Install: brew install --cask vagrant");
    }

    if plugin_ok {
        output::success("vagrant-parallels plugin installed");
    } else {
        output::error("vagrant-parallels plugin not installed");
        output::info("  Install: vagrant plugin install vagrant-parallels");
    }

    if let Some(version) = &prlctl {
        output::success(&format!("Parallels Desktop installed: {version}"));
    } else {
        output::error("Parallels Desktop not installed");
        output::info("  Packer drives Parallels through prlctl; Desktop Pro or Business required");
        output::info("  https://www.parallels.com/products/desktop/");
    }

    if os != "macos" {
        output::warning(&format!(
            "Parallels Desktop runs on macOS; this host is {os}"
        ));
    }
    if arch != "aarch64" {
        output::warning(&format!(
            "ARM64 guests need an Apple silicon host; this host is {arch}"
        ));
    }

    println!();
    if satisfied {
        println!("{}", "All required tools are installed.".green());
        Ok(())
    } else {
        println!(
            "{}",
            format!("{} required tool(s) missing.", missing.len()).yellow()
        );
        Err(anyhow!("Missing required tools"))
    }
}
