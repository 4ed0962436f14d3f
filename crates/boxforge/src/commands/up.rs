//! Up command - import the box into Vagrant and boot the VM

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_vagrant::{box_add, box_present, VagrantMachine};
use camino::Utf8Path;

use crate::cli::UpArgs;
use crate::output;

pub async fn run(args: UpArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let workspace = config.workspace_dir();
    let machine = VagrantMachine::new(workspace.as_std_path());

    output::header(&format!("Booting: {}", config.name()));

    let spinner = output::spinner("Checking VM state...");
    let state = machine.status().await;
    spinner.finish_and_clear();
    let state = state?;
    tracing::debug!("VM state: {}", state);

    // `vagrant up --provision` on a running VM still reruns provisioners,
    // so only short-circuit when there is nothing to do
    if state.is_running() && !args.provision {
        output::success("VM is already running");
        output::info("Connect with: boxforge ssh");
        return Ok(());
    }

    // Import the box unless vagrant already has one under this name
    if args.reimport || !box_present(config.name()).await? {
        let box_path = config.box_path();
        let spinner = output::spinner("Importing box into vagrant...");
        let result = box_add(config.name(), box_path.as_std_path()).await;
        spinner.finish_and_clear();
        result?;
        output::success(&format!("Box imported: {}", config.name()));
    }

    machine.up(args.provision).await?;

    output::success("VM is running");
    output::info("Connect with: boxforge ssh");

    Ok(())
}
