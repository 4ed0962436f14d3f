//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Boxforge - Forge Vagrant-ready Ubuntu ARM64 boxes for Parallels Desktop
#[derive(Parser, Debug)]
#[command(name = "boxforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to boxforge.yaml config file
    // Long-only: `ssh -c` owns the short, matching vagrant's own flag
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate the Packer workspace (template, autoinstall seed, Vagrantfile)
    Scaffold(ScaffoldArgs),

    /// Validate the generated Packer template
    Validate(ValidateArgs),

    /// Build the box image with Packer
    Build(BuildArgs),

    /// Import the box into Vagrant and boot the VM
    Up(UpArgs),

    /// Open an SSH session to the running VM
    Ssh(SshArgs),

    /// Gracefully stop the VM
    Halt(HaltArgs),

    /// Destroy the VM
    Destroy(DestroyArgs),

    /// Show VM and box status
    Status(StatusArgs),

    /// Check that required tools are installed
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new boxforge.yaml
    Init(ConfigInitArgs),

    /// Validate the configuration
    Validate(ConfigValidateArgs),

    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Box name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Ubuntu series to build (noble, jammy)
    #[arg(short, long, default_value = "noble")]
    pub series: String,

    /// Output file path
    #[arg(short, long, default_value = "boxforge.yaml")]
    pub output: Utf8PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// Path to config file (default: find boxforge.yaml)
    #[arg(short, long)]
    pub file: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Scaffold command
#[derive(Args, Debug)]
pub struct ScaffoldArgs {
    /// Workspace directory (default: output.directory from boxforge.yaml)
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite existing workspace files
    #[arg(short, long)]
    pub force: bool,
}

// Validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Check HCL syntax only, without installing plugins
    #[arg(long)]
    pub syntax_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Overwrite artifacts left by a previous build
    #[arg(short, long)]
    pub force: bool,

    /// Print the rendered Packer template without building
    #[arg(long)]
    pub dry_run: bool,

    /// Enable Packer debug logging
    #[arg(long)]
    pub debug: bool,

    /// Skip template validation
    #[arg(long)]
    pub skip_validation: bool,

    /// Path to a Packer variables file (repeatable)
    #[arg(long = "var-file", value_name = "FILE")]
    pub var_files: Vec<PathBuf>,

    /// Packer variable as key=value (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub variables: Vec<String>,

    /// Behavior on build error: cleanup, abort, or ask
    #[arg(long, default_value = "cleanup")]
    pub on_error: String,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

// Up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Re-import the box even if Vagrant already has it
    #[arg(long)]
    pub reimport: bool,

    /// Force provisioners to run even on an already-created VM
    #[arg(long)]
    pub provision: bool,
}

// Ssh command
#[derive(Args, Debug)]
pub struct SshArgs {
    /// Command to run instead of an interactive shell
    #[arg(short = 'c', long)]
    pub command: Option<String>,
}

// Halt command
#[derive(Args, Debug)]
pub struct HaltArgs {
    /// Force power off instead of a graceful shutdown
    #[arg(short, long)]
    pub force: bool,
}

// Destroy command
#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Also remove the imported box from vagrant
    #[arg(long)]
    pub remove_box: bool,
}

// Status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::try_parse_from(["boxforge", "build"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(!args.force);
                assert!(!args.dry_run);
                assert!(!args.debug);
                assert!(!args.skip_validation);
                assert!(args.var_files.is_empty());
                assert!(args.variables.is_empty());
                assert_eq!(args.on_error, "cleanup");
            }
            _ => panic!("expected build subcommand"),
        }
    }

    #[test]
    fn test_parse_build_repeatable_vars() {
        let cli = Cli::try_parse_from([
            "boxforge",
            "build",
            "--var",
            "iso_url=file:///tmp/x.iso",
            "--var",
            "cpus=8",
            "--var-file",
            "common.pkrvars.hcl",
            "--on-error",
            "abort",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.variables.len(), 2);
                assert_eq!(args.var_files.len(), 1);
                assert_eq!(args.on_error, "abort");
            }
            _ => panic!("expected build subcommand"),
        }
    }

    #[test]
    fn test_parse_config_init_defaults() {
        let cli = Cli::try_parse_from(["boxforge", "config", "init"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert_eq!(args.series, "noble");
                assert_eq!(args.output, Utf8PathBuf::from("boxforge.yaml"));
                assert!(args.name.is_none());
                assert!(!args.force);
            }
            _ => panic!("expected config init subcommand"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "boxforge",
            "-vv",
            "--config",
            "custom.yaml",
            "status",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Utf8Path::new("custom.yaml")));
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("expected status subcommand"),
        }
    }

    #[test]
    fn test_parse_ssh_command_flag() {
        let cli = Cli::try_parse_from(["boxforge", "ssh", "-c", "uname -m"]).unwrap();
        match cli.command {
            Commands::Ssh(args) => {
                assert_eq!(args.command.as_deref(), Some("uname -m"));
            }
            _ => panic!("expected ssh subcommand"),
        }
    }
}
