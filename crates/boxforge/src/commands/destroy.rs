//! Destroy command

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_vagrant::{box_remove, VagrantMachine};
use camino::Utf8Path;
use dialoguer::Confirm;

use crate::cli::DestroyArgs;
use crate::output;

pub async fn run(args: DestroyArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;

    if !args.force {
        let prompt = format!("Destroy the '{}' VM?", config.name());
        let confirmed = Confirm::new().with_prompt(prompt).default(false).interact()?;
        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    output::header(&format!("Destroying {}", config.name()));

    let machine = VagrantMachine::new(config.workspace_dir().as_std_path());

    let spinner = output::spinner("Destroying VM...");
    let result = machine.destroy().await;
    spinner.finish_and_clear();
    result?;

    output::success("VM destroyed");

    if args.remove_box {
        let spinner = output::spinner("Removing box...");
        let result = box_remove(config.name()).await;
        spinner.finish_and_clear();
        result?;
        output::success(&format!("Box removed: {}", config.name()));
    } else {
        output::info("The box stays imported; drop it with --remove-box");
    }

    Ok(())
}
