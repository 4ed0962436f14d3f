//! Vagrant machine lifecycle operations
//!
//! Wraps the vagrant CLI against a scaffolded workspace directory. Long
//! operations (up, ssh) run with inherited stdio so vagrant's own progress
//! and prompts reach the terminal; probes use captured output.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::utils::{ensure_vagrant, vagrant_output};

/// State of the workspace VM as vagrant reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    NotCreated,
    Running,
    Stopped,
    Suspended,
    Unknown,
}

impl MachineState {
    // Raw states come from vagrant-parallels; aborted shows up after a hard
    // host shutdown.
    fn from_raw(raw: &str) -> Self {
        match raw {
            "running" => MachineState::Running,
            "stopped" | "poweroff" | "aborted" => MachineState::Stopped,
            "suspended" | "paused" => MachineState::Suspended,
            "not_created" => MachineState::NotCreated,
            _ => MachineState::Unknown,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, MachineState::Running)
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MachineState::NotCreated => "not created",
            MachineState::Running => "running",
            MachineState::Stopped => "stopped",
            MachineState::Suspended => "suspended",
            MachineState::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A vagrant machine rooted at a workspace directory
pub struct VagrantMachine {
    /// Directory holding the generated Vagrantfile
    workspace: PathBuf,
}

impl VagrantMachine {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Boot the VM with the parallels provider, streaming vagrant's output
    pub async fn up(&self, provision: bool) -> Result<()> {
        self.ensure_vagrantfile()?;
        ensure_vagrant()?;

        info!("Booting VM in {}", self.workspace.display());

        let mut args = vec!["up", "--provider", "parallels"];
        if provision {
            args.push("--provision");
        }

        let status = Command::new("vagrant")
            .args(&args)
            .current_dir(&self.workspace)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .context("Failed to run vagrant up")?;

        if !status.success() {
            bail!("vagrant up failed");
        }

        Ok(())
    }

    /// Open an SSH session into the VM, interactive unless a command is given
    pub async fn ssh(&self, command: Option<&str>) -> Result<()> {
        self.ensure_vagrantfile()?;
        ensure_vagrant()?;

        let mut cmd = Command::new("vagrant");
        cmd.arg("ssh");
        if let Some(remote_cmd) = command {
            cmd.args(["-c", remote_cmd]);
        }

        let status = cmd
            .current_dir(&self.workspace)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .context("Failed to run vagrant ssh")?;

        // For an interactive session the exit status is not checked: leaving
        // the shell is the normal way to disconnect, whatever code the shell
        // exits with. A one-shot command propagates its failure.
        if command.is_some() && !status.success() {
            bail!("vagrant ssh -c exited with {}", status);
        }

        Ok(())
    }

    /// Shut the VM down, gracefully by default
    pub async fn halt(&self, force: bool) -> Result<()> {
        self.ensure_vagrantfile()?;
        ensure_vagrant()?;

        info!("Halting VM in {}", self.workspace.display());

        let mut args = vec!["halt"];
        if force {
            args.push("--force");
        }

        let output = vagrant_output(&args, Some(&self.workspace)).await?;
        if !output.status.success() {
            bail!(
                "vagrant halt failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }

    /// Destroy the VM without prompting; confirmation belongs to the caller
    pub async fn destroy(&self) -> Result<()> {
        self.ensure_vagrantfile()?;
        ensure_vagrant()?;

        info!("Destroying VM in {}", self.workspace.display());

        let output = vagrant_output(&["destroy", "-f"], Some(&self.workspace)).await?;
        if !output.status.success() {
            bail!(
                "vagrant destroy failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }

    /// Query the machine state via the machine-readable status output
    pub async fn status(&self) -> Result<MachineState> {
        self.ensure_vagrantfile()?;
        ensure_vagrant()?;

        let output = vagrant_output(&["status", "--machine-readable"], Some(&self.workspace))
            .await
            .context("Failed to query vagrant status")?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("vagrant status output: {}", stdout.trim());

        Ok(parse_machine_state(&stdout))
    }

    fn ensure_vagrantfile(&self) -> Result<()> {
        if !self.workspace.join("Vagrantfile").is_file() {
            bail!(
                "No Vagrantfile in {}. Scaffold the workspace first: boxforge scaffold",
                self.workspace.display()
            );
        }
        Ok(())
    }
}

// Machine-readable rows are timestamp,target,type,data. State values never
// contain commas, so splitting off the first three fields is enough.
fn parse_machine_state(output: &str) -> MachineState {
    for line in output.lines() {
        let fields: Vec<&str> = line.splitn(4, ',').collect();
        if fields.len() >= 4 && fields[2] == "state" {
            return MachineState::from_raw(fields[3].trim());
        }
    }
    MachineState::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_machine_state_running() {
        let output = "\
1700000000,default,metadata,provider,parallels
1700000000,default,provider-name,parallels
1700000000,default,state,running
1700000000,default,state-human-short,running
1700000000,default,state-human-long,The VM is running.";
        assert_eq!(parse_machine_state(output), MachineState::Running);
    }

    #[test]
    fn test_parse_machine_state_not_created() {
        let output = "1700000000,default,state,not_created\n";
        assert_eq!(parse_machine_state(output), MachineState::NotCreated);
    }

    #[test]
    fn test_parse_machine_state_variants() {
        assert_eq!(
            parse_machine_state("1,default,state,stopped\n"),
            MachineState::Stopped
        );
        assert_eq!(
            parse_machine_state("1,default,state,poweroff\n"),
            MachineState::Stopped
        );
        assert_eq!(
            parse_machine_state("1,default,state,suspended\n"),
            MachineState::Suspended
        );
        assert_eq!(
            parse_machine_state("1,default,state,warp_drive\n"),
            MachineState::Unknown
        );
    }

    #[test]
    fn test_parse_machine_state_missing() {
        assert_eq!(parse_machine_state(""), MachineState::Unknown);
        assert_eq!(
            parse_machine_state("1700000000,default,provider-name,parallels\n"),
            MachineState::Unknown
        );
    }

    #[test]
    fn test_state_display() {
        assert_eq!(MachineState::NotCreated.to_string(), "not created");
        assert_eq!(MachineState::Running.to_string(), "running");
    }

    #[tokio::test]
    async fn test_ops_require_vagrantfile() {
        let dir = TempDir::new().unwrap();
        let machine = VagrantMachine::new(dir.path());

        let err = machine.up(false).await.unwrap_err();
        assert!(err.to_string().contains("No Vagrantfile"));

        let err = machine.status().await.unwrap_err();
        assert!(err.to_string().contains("No Vagrantfile"));
    }
}
