//! Scaffold command

use anyhow::Result;
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_packer::ParallelsBuilder;
use camino::Utf8Path;

use crate::cli::ScaffoldArgs;
use crate::output;

pub async fn run(args: ScaffoldArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let mut config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    if let Some(dir) = args.output {
        config.config.output.directory = Some(dir);
    }
    let builder = ParallelsBuilder::new(config)?;
    let workspace = builder.workspace_dir();

    output::header(&format!("Scaffolding: {}", builder.config().name()));
    output::kv("Workspace", workspace.as_str());

    let spinner = output::spinner("Rendering workspace files...");
    let result = builder.scaffold(args.force);
    spinner.finish_and_clear();

    let written = result?;

    output::success(&format!("Wrote {} files", written.len()));
    for path in &written {
        let rel = path.strip_prefix(workspace.as_std_path()).unwrap_or(path);
        println!("  {}", rel.display());
    }

    output::info("Next: boxforge build");

    Ok(())
}
