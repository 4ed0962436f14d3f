//! Config command

use anyhow::{anyhow, Result};
use boxforge_core::config::{generate_config, ForgeConfig};
use boxforge_core::schema::SchemaValidator;
use boxforge_core::types::UbuntuSeries;
use camino::Utf8Path;

use crate::cli::{ConfigCommands, ConfigInitArgs, ConfigShowArgs, ConfigValidateArgs};
use crate::output;

pub async fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Init(args) => init(args),
        ConfigCommands::Validate(args) => validate(args, config_path),
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

fn init(args: ConfigInitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (pass --force to overwrite)",
            args.output
        ));
    }

    let name = args.name.unwrap_or_else(default_box_name);
    let series: UbuntuSeries = args.series.parse().map_err(|e: String| anyhow!(e))?;

    let content = generate_config(&name, series)
        .map_err(|e| anyhow!("Failed to generate config: {}", e))?;
    std::fs::write(&args.output, content)?;

    output::success(&format!("Created {}", args.output));
    output::kv("Name", &name);
    output::kv("Ubuntu", &format!("{} ({})", series, series.release()));
    output::info("Next: boxforge scaffold && boxforge build");

    Ok(())
}

/// Box name derived from the current directory, normalized to the
/// lowercase-kebab shape the schema requires
fn default_box_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_lowercase()))
        .map(|n| n.replace([' ', '_'], "-"))
        .unwrap_or_else(|| "my-box".to_string())
}

fn validate(args: ConfigValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let spinner = output::spinner("Validating configuration...");

    // Load and validate against the bundled schema; -f wins over --config
    let path = args.file.as_deref().or(config_path);
    let config = ForgeConfig::load_and_validate(path, SchemaValidator::global())?;

    spinner.finish_and_clear();

    output::success(&format!("Configuration is valid: {}", config.config_path));
    output::kv("Name", config.name());
    output::kv("Ubuntu", &config.series().to_string());
    output::kv("Workspace", config.workspace_dir().as_str());

    Ok(())
}

fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    if args.json {
        let json = serde_json::to_string_pretty(&config.config)?;
        println!("{}", json);
    } else {
        let yaml = config.to_yaml()?;
        println!("{}", yaml);
    }

    Ok(())
}
