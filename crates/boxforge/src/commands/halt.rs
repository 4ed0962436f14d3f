//! Halt command - stop the VM

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_vagrant::VagrantMachine;
use camino::Utf8Path;

use crate::cli::HaltArgs;
use crate::output;

pub async fn run(args: HaltArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let machine = VagrantMachine::new(config.workspace_dir().as_std_path());

    let spinner = output::spinner("Halting VM...");
    let result = machine.halt(args.force).await;
    spinner.finish_and_clear();
    result?;

    output::success(&format!("VM halted: {}", config.name()));

    Ok(())
}
