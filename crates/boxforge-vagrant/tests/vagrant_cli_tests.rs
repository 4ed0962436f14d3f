//! Box registry and machine lifecycle tests against a scripted vagrant binary
//!
//! A fake `vagrant` on PATH answers the machine-readable queries these
//! wrappers parse, so the subprocess plumbing is exercised without Vagrant or
//! a VM. PATH is process-global state, so everything here runs serially.

#![cfg(unix)]

mod common;

use boxforge_vagrant::{
    box_add, box_present, box_remove, parallels_plugin_installed, MachineState, VagrantMachine,
};
use common::{fake_cli_log, install_fake_cli};
use serial_test::serial;
use tempfile::TempDir;

fn put_fake_on_path(dir: &std::path::Path) -> String {
    let original = std::env::var("PATH").unwrap_or_default();
    std::env::set_var("PATH", format!("{}:{}", dir.display(), original));
    original
}

fn restore_path(original: &str) {
    std::env::set_var("PATH", original);
}

#[tokio::test]
#[serial]
async fn test_box_present_reads_the_registry() {
    let bin = TempDir::new().unwrap();
    let listing = "\
1700000000,,ui,info,dev-box (parallels%!(VAGRANT_COMMA) 0)
1700000000,,box-name,dev-box
1700000000,,box-provider,parallels
1700000000,,box-version,0";
    install_fake_cli(bin.path(), "vagrant", &[("box list", listing, 0)]).unwrap();

    let original = put_fake_on_path(bin.path());
    let present = box_present("dev-box").await;
    let absent = box_present("prod-box").await;
    restore_path(&original);

    assert!(present.unwrap());
    assert!(!absent.unwrap());
}

#[tokio::test]
#[serial]
async fn test_box_inventory_errors_without_vagrant() {
    let original = std::env::var("PATH").unwrap_or_default();
    std::env::set_var("PATH", "/nonexistent");
    let result = box_present("dev-box").await;
    std::env::set_var("PATH", &original);

    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("Vagrant is not installed"), "got '{}'", msg);
}

#[tokio::test]
#[serial]
async fn test_box_add_requires_the_artifact() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(bin.path(), "vagrant", &[("box add", "", 0)]).unwrap();

    let workspace = TempDir::new().unwrap();
    let missing = workspace.path().join("builds/relay.box");

    let original = put_fake_on_path(bin.path());
    let result = box_add("relay", &missing).await;
    restore_path(&original);

    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("does not exist"), "got '{}'", msg);

    let log = fake_cli_log(bin.path(), "vagrant");
    assert!(
        log.is_empty(),
        "vagrant must not run without an artifact. Log: {:?}",
        log
    );
}

#[tokio::test]
#[serial]
async fn test_box_add_forwards_name_and_force() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(bin.path(), "vagrant", &[("box add", "", 0)]).unwrap();

    let workspace = TempDir::new().unwrap();
    let box_file = workspace.path().join("relay.box");
    std::fs::write(&box_file, b"boxdata").unwrap();

    let original = put_fake_on_path(bin.path());
    let result = box_add("relay", &box_file).await;
    restore_path(&original);
    result.unwrap();

    let log = fake_cli_log(bin.path(), "vagrant");
    let line = log
        .iter()
        .find(|l| l.starts_with("box add"))
        .expect("box add ran");
    assert!(line.contains("--name relay"), "got '{}'", line);
    assert!(line.contains("--force"), "got '{}'", line);
}

#[tokio::test]
#[serial]
async fn test_box_remove_drops_by_name() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(bin.path(), "vagrant", &[("box remove", "", 0)]).unwrap();

    let original = put_fake_on_path(bin.path());
    let result = box_remove("relay").await;
    restore_path(&original);
    result.unwrap();

    let log = fake_cli_log(bin.path(), "vagrant");
    let line = log
        .iter()
        .find(|l| l.starts_with("box remove"))
        .expect("box remove ran");
    assert!(line.contains("--force relay"), "got '{}'", line);
}

#[tokio::test]
#[serial]
async fn test_plugin_detection_parses_plugin_list() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(
        bin.path(),
        "vagrant",
        &[(
            "plugin list",
            "vagrant-parallels (2.4.3, global)\nvagrant-share (2.0.0, system)",
            0,
        )],
    )
    .unwrap();

    let original = put_fake_on_path(bin.path());
    let installed = parallels_plugin_installed().await;
    restore_path(&original);

    assert!(installed.unwrap());
}

#[tokio::test]
#[serial]
async fn test_plugin_detection_handles_none_installed() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(
        bin.path(),
        "vagrant",
        &[("plugin list", "No plugins installed.", 0)],
    )
    .unwrap();

    let original = put_fake_on_path(bin.path());
    let installed = parallels_plugin_installed().await;
    restore_path(&original);

    assert!(!installed.unwrap());
}

#[tokio::test]
#[serial]
async fn test_status_reports_machine_state() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(
        bin.path(),
        "vagrant",
        &[("status", "1700000000,default,state,running", 0)],
    )
    .unwrap();

    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join("Vagrantfile"),
        "Vagrant.configure(\"2\") do |config|\nend\n",
    )
    .unwrap();

    let machine = VagrantMachine::new(workspace.path());

    let original = put_fake_on_path(bin.path());
    let state = machine.status().await;
    restore_path(&original);

    assert_eq!(state.unwrap(), MachineState::Running);
}

#[tokio::test]
#[serial]
async fn test_halt_propagates_failure() {
    let bin = TempDir::new().unwrap();
    install_fake_cli(bin.path(), "vagrant", &[("halt", "", 1)]).unwrap();

    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join("Vagrantfile"),
        "Vagrant.configure(\"2\") do |config|\nend\n",
    )
    .unwrap();

    let machine = VagrantMachine::new(workspace.path());

    let original = put_fake_on_path(bin.path());
    let result = machine.halt(false).await;
    restore_path(&original);

    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("vagrant halt failed"), "got '{}'", msg);
}
