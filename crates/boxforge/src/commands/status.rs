//! Status command

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_vagrant::{box_present, VagrantMachine};
use camino::Utf8Path;

use crate::cli::StatusArgs;
use crate::output;

pub async fn run(args: StatusArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let machine = VagrantMachine::new(config.workspace_dir().as_std_path());

    let state = machine.status().await?;
    let box_imported = box_present(config.name()).await?;
    let box_path = config.box_path();
    let box_built = box_path.is_file();

    if args.json {
        let json = serde_json::json!({
            "name": config.name(),
            "state": state,
            "workspace": config.workspace_dir(),
            "box_file": box_path,
            "box_built": box_built,
            "box_imported": box_imported,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        output::header(&format!("Status: {}", config.name()));
        output::kv("State", &state.to_string());
        output::kv("Workspace", config.workspace_dir().as_str());
        if box_built {
            output::kv("Box file", box_path.as_str());
        } else {
            output::kv("Box file", "not built (run: boxforge build)");
        }
        output::kv("Box imported", if box_imported { "yes" } else { "no" });
    }

    Ok(())
}
