//! Ssh command - connect to the running VM

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_vagrant::VagrantMachine;
use camino::Utf8Path;

use crate::cli::SshArgs;

pub async fn run(args: SshArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let machine = VagrantMachine::new(config.workspace_dir().as_std_path());

    machine.ssh(args.command.as_deref()).await
}
