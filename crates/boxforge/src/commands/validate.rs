//! Validate command - check the generated Packer template

use anyhow::{anyhow, Result};
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_packer::ParallelsBuilder;
use camino::Utf8Path;

use crate::cli::ValidateArgs;
use crate::output;

pub async fn run(args: ValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let builder = ParallelsBuilder::new(config)?;

    if args.json {
        let result = builder.validate(args.syntax_only).await?;
        let report = serde_json::json!({
            "valid": result.valid,
            "errors": result.errors,
            "warnings": result.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !result.valid {
            return Err(anyhow!("Packer rejected the template"));
        }
        return Ok(());
    }

    output::header(&format!("Validating: {}", builder.config().name()));

    let spinner = output::spinner("Running packer validate...");
    let outcome = builder.validate(args.syntax_only).await;
    spinner.finish_and_clear();
    let result = outcome?;

    if !result.valid {
        output::error("Packer rejected the template");
        for line in &result.errors {
            output::info(line);
        }
        return Err(anyhow!("Packer rejected the template"));
    }

    output::success("Packer template checks out");
    for line in &result.warnings {
        output::warning(line);
    }
    Ok(())
}
