//! Packer build orchestration
//!
//! The flow matches what a hand-driven build looks like: scaffold the
//! workspace if it is missing, `packer init`, `packer validate`,
//! `packer build`. Build output streams straight to the terminal since an
//! ISO install runs well past fifteen minutes and -on-error=ask can prompt.

use anyhow::{anyhow, bail, Context, Result};
use camino::Utf8PathBuf;
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

use boxforge_core::ForgeConfig;

use crate::scaffold::{write_workspace, ScaffoldFile};
use crate::templates::{TemplateRegistry, TEMPLATE_FILE};
use crate::types::{BuildOptions, BuildResult, ValidationResult};
use crate::utils::{check_packer_installed, packer_init, packer_validate};

/// Drives packer against a rendered workspace
pub struct ParallelsBuilder {
    config: ForgeConfig,
    templates: TemplateRegistry,
}

impl ParallelsBuilder {
    /// Create a builder for the given configuration
    pub fn new(config: ForgeConfig) -> Result<Self> {
        let templates = TemplateRegistry::new()?;
        Ok(Self { config, templates })
    }

    /// The loaded configuration this builder operates on
    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Directory the workspace renders into
    pub fn workspace_dir(&self) -> Utf8PathBuf {
        self.config.workspace_dir()
    }

    /// Render all workspace files without touching disk
    pub fn render_workspace(&self) -> Result<Vec<ScaffoldFile>> {
        self.templates.render_workspace(self.config.inner())
    }

    /// Render just the Packer template
    pub fn render_template(&self) -> Result<String> {
        self.templates.render_template(self.config.inner())
    }

    /// Render the workspace and write it to disk, returning the written paths
    pub fn scaffold(&self, force: bool) -> Result<Vec<PathBuf>> {
        let files = self.render_workspace()?;
        let dir = self.workspace_dir();
        let written = write_workspace(dir.as_std_path(), &files, force)?;
        info!("Scaffolded {} files into {}", written.len(), dir);
        Ok(written)
    }

    /// Validate the rendered template with `packer validate`
    ///
    /// Full validation needs the plugins installed, so `packer init` runs
    /// first unless `syntax_only` is set.
    pub async fn validate(&self, syntax_only: bool) -> Result<ValidationResult> {
        self.ensure_packer()?;
        self.ensure_scaffolded()?;

        let workspace = self.workspace_dir();

        if !syntax_only {
            let init = packer_init(workspace.as_std_path()).await?;
            if !init.status.success() {
                return Err(anyhow!(
                    "Packer init failed: {}",
                    String::from_utf8_lossy(&init.stderr)
                ));
            }
        }

        let output = packer_validate(workspace.as_std_path(), syntax_only).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let warnings = stdout
            .lines()
            .filter(|line| line.trim_start().starts_with("Warning"))
            .map(|line| line.trim().to_string())
            .collect();

        if output.status.success() {
            Ok(ValidationResult {
                valid: true,
                errors: Vec::new(),
                warnings,
            })
        } else {
            // Packer splits HCL diagnostics across both streams
            let errors = stderr
                .lines()
                .chain(stdout.lines())
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            Ok(ValidationResult {
                valid: false,
                errors,
                warnings,
            })
        }
    }

    /// Run the full init, validate, build sequence against the workspace.
    ///
    /// The workspace is scaffolded first when its template is missing; an
    /// existing workspace builds as-is, so hand edits survive. Regeneration
    /// is explicit via `scaffold --force`. Init and validation failures
    /// abort before packer build is ever spawned.
    pub async fn build(&self, options: &BuildOptions) -> Result<BuildResult> {
        self.ensure_packer()?;
        self.ensure_scaffolded()?;

        let workspace = self.workspace_dir();

        let init = packer_init(workspace.as_std_path()).await?;
        if !init.status.success() {
            return Err(anyhow!(
                "Packer init failed: {}",
                String::from_utf8_lossy(&init.stderr)
            ));
        }

        if options.skip_validation {
            debug!("Skipping packer validate");
        } else {
            let validation = packer_validate(workspace.as_std_path(), false).await?;
            if !validation.status.success() {
                return Err(anyhow!(
                    "Packer validation failed: {}",
                    String::from_utf8_lossy(&validation.stderr)
                ));
            }
        }

        self.run_packer_build(options).await
    }

    /// Assemble and run `packer build`, streaming output to the terminal
    async fn run_packer_build(&self, options: &BuildOptions) -> Result<BuildResult> {
        let workspace = self.workspace_dir();

        let mut cmd = Command::new("packer");
        cmd.arg("build");
        cmd.current_dir(workspace.as_std_path());

        if options.force {
            cmd.arg("-force");
        }

        if options.debug {
            cmd.env("PACKER_LOG", "1");
        }

        for var_file in &options.var_files {
            cmd.arg(format!("-var-file={}", var_file.display()));
        }

        for (key, value) in &options.variables {
            cmd.arg("-var").arg(format!("{key}={value}"));
        }

        cmd.arg(format!("-on-error={}", options.on_error.as_packer_flag()));
        cmd.arg(TEMPLATE_FILE);

        info!("Starting packer build for {}", self.config.name());
        let start = Instant::now();

        let status = cmd.status().await.context("Failed to run packer build")?;

        let build_time = start.elapsed();
        let box_path = self.config.box_path();

        if !status.success() {
            return Ok(BuildResult {
                success: false,
                box_name: self.config.inner().box_file_name(),
                box_path: box_path.into_std_path_buf(),
                build_time,
                exit_code: status.code(),
            });
        }

        if !box_path.is_file() {
            bail!("packer exited successfully but no box artifact exists at {box_path}");
        }

        info!(
            "Build finished in {}s, box at {}",
            build_time.as_secs(),
            box_path
        );

        Ok(BuildResult {
            success: true,
            box_name: self.config.inner().box_file_name(),
            box_path: box_path.into_std_path_buf(),
            build_time,
            exit_code: status.code(),
        })
    }

    fn ensure_packer(&self) -> Result<()> {
        match check_packer_installed() {
            Some(version) => {
                debug!("Found packer {version}");
                Ok(())
            }
            None => bail!(
                "Packer is not installed or not on PATH. Install it with: brew install packer"
            ),
        }
    }

    fn ensure_scaffolded(&self) -> Result<()> {
        let template = self.workspace_dir().join(TEMPLATE_FILE);
        if !template.is_file() {
            self.scaffold(false)?;
        }
        Ok(())
    }
}
