//! End-to-end scaffold tests: rendered workspaces written to disk

mod common;
use common::*;

use boxforge_packer::ParallelsBuilder;
use camino::Utf8PathBuf;
use tempfile::TempDir;

#[test]
fn test_builder_scaffold_end_to_end() {
    let dir = TempDir::new().unwrap();
    let builder = ParallelsBuilder::new(config_in(&dir, "dev-box")).unwrap();

    let written = builder.scaffold(false).unwrap();
    assert_eq!(written.len(), 6);

    // On-disk contents match the rendered set byte for byte
    let rendered = builder.render_workspace().unwrap();
    let ws = dir.path().join("dev-box");
    for file in &rendered {
        let on_disk = std::fs::read_to_string(ws.join(&file.relative_path)).unwrap();
        assert_eq!(on_disk, file.contents, "{} differs on disk", file.relative_path);
    }
}

#[test]
fn test_scaffold_respects_output_directory() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir, "dev-box");
    config.config.output.directory = Some(Utf8PathBuf::from("images/dev"));

    let builder = ParallelsBuilder::new(config).unwrap();
    assert!(builder.workspace_dir().ends_with("images/dev"));

    builder.scaffold(false).unwrap();
    assert!(dir.path().join("images/dev/ubuntu.pkr.hcl").is_file());
    assert!(!dir.path().join("dev-box").exists());
}

#[test]
fn test_scaffold_overwrite_protection() {
    let dir = TempDir::new().unwrap();
    let builder = ParallelsBuilder::new(config_in(&dir, "dev-box")).unwrap();

    builder.scaffold(false).unwrap();

    // Hand-edit one file, then make sure a plain scaffold refuses to clobber
    let template = dir.path().join("dev-box/ubuntu.pkr.hcl");
    std::fs::write(&template, "# edited\n").unwrap();

    let err = builder.scaffold(false).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read_to_string(&template).unwrap(), "# edited\n");

    // Force regenerates it
    builder.scaffold(true).unwrap();
    assert_ne!(std::fs::read_to_string(&template).unwrap(), "# edited\n");
}

#[test]
fn test_rescaffold_leaves_build_artifacts_alone() {
    let dir = TempDir::new().unwrap();
    let builder = ParallelsBuilder::new(config_in(&dir, "dev-box")).unwrap();

    builder.scaffold(false).unwrap();

    let builds = dir.path().join("dev-box/builds");
    std::fs::create_dir_all(&builds).unwrap();
    std::fs::write(builds.join("dev-box.box"), "fake box").unwrap();

    builder.scaffold(true).unwrap();
    assert!(builds.join("dev-box.box").is_file());
}

#[cfg(unix)]
#[test]
fn test_setup_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let builder = ParallelsBuilder::new(config_in(&dir, "dev-box")).unwrap();
    builder.scaffold(false).unwrap();

    let mode = std::fs::metadata(dir.path().join("dev-box/setup.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);

    let seed_mode = std::fs::metadata(dir.path().join("dev-box/http/user-data"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(seed_mode & 0o111, 0);
}
