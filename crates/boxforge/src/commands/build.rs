//! Build command - forge the box with HashiCorp Packer

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use boxforge_core::config::ForgeConfig;
use boxforge_core::schema::SchemaValidator;
use boxforge_packer::{
    check_prerequisites, BuildOptions, BuildResult, OnErrorBehavior, ParallelsBuilder,
};
use camino::Utf8Path;

use crate::cli::BuildArgs;
use crate::output;

pub async fn run(args: BuildArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let on_error: OnErrorBehavior = args.on_error.parse().map_err(|e: String| anyhow!(e))?;
    let variables = parse_variables(&args.variables)?;

    let config = ForgeConfig::load_and_validate(config_path, SchemaValidator::global())?;
    let builder = ParallelsBuilder::new(config)?;

    let prereqs = check_prerequisites();

    if !prereqs.packer_installed() {
        output::error("packer was not found on PATH");
        for hint in &prereqs.hints {
            output::warning(hint);
        }
        return Err(anyhow!("packer is required to build boxes"));
    }

    // Styled progress stays off stdout when the caller asked for JSON
    if !args.json {
        output::header(&format!("Building box: {}", builder.config().name()));

        if !prereqs.satisfied {
            output::warning(
                "Missing tools (packer can build the box, but `boxforge up` needs them):",
            );
            for hint in &prereqs.hints {
                output::info(hint);
            }
            output::info("");
        }

        let inner = builder.config().inner();
        output::kv(
            "Ubuntu",
            &format!(
                "{} ({})",
                inner.ubuntu.series,
                inner.ubuntu.resolved_version()
            ),
        );
        output::kv("ISO", &inner.ubuntu.resolved_iso_url());
        output::kv("Workspace", builder.workspace_dir().as_str());
        output::kv("Box file", builder.config().box_path().as_str());
        output::info("");
    }

    // --dry-run prints only the rendered HCL so it can be piped to a file
    if args.dry_run {
        let template = builder.render_template()?;
        println!("{template}");
        return Ok(());
    }

    let opts = BuildOptions {
        force: args.force,
        debug: args.debug,
        skip_validation: args.skip_validation,
        var_files: args.var_files.clone(),
        variables,
        on_error,
    };
    tracing::debug!("Build options: {:?}", opts);

    // No spinner here: packer streams its own progress to the terminal, and
    // an ISO install runs for 15+ minutes.
    let result = builder.build(&opts).await?;

    // One machine-readable document for either outcome
    if args.json {
        println!("{}", serde_json::to_string_pretty(&build_report(&result))?);
        if result.success {
            return Ok(());
        }
        return Err(anyhow!("Box build failed"));
    }

    if result.success {
        let secs = result.build_time.as_secs();
        output::success("Box build complete");
        output::kv("Box", &result.box_path.display().to_string());
        output::kv("Build time", &format!("{}m {}s", secs / 60, secs % 60));
        output::info("Next: boxforge up");
        Ok(())
    } else {
        output::error("Box build failed");
        if let Some(code) = result.exit_code {
            output::info(&format!("packer exited with status {}", code));
        }
        Err(anyhow!("Box build failed"))
    }
}

/// JSON report printed by `build --json`, success or not
fn build_report(result: &BuildResult) -> serde_json::Value {
    serde_json::json!({
        "success": result.success,
        "box_name": result.box_name,
        "box_path": result.box_path,
        "build_time_secs": result.build_time.as_secs(),
        "exit_code": result.exit_code,
    })
}

/// Parse repeated KEY=VALUE arguments into a map
fn parse_variables(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid variable '{}'. Expected KEY=VALUE", pair))?;
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
