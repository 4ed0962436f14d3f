//! Template context for config generation

use crate::types::{SshConfig, UbuntuSeries, VmConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tera::Context;

/// Information about a selectable Ubuntu series, listed in the generated
/// config's comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Series name (e.g. "noble")
    pub name: String,
    /// Latest published point release
    pub version: String,
    /// Human-readable description
    pub description: String,
}

/// Context for rendering the boxforge.yaml starter template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInitContext {
    /// Workspace and box name
    pub name: String,
    /// Selected series
    pub series: String,
    /// Point release for the selected series
    pub version: String,
    /// Default virtual CPU count
    pub cpus: u32,
    /// Default memory in MB
    pub memory: u32,
    /// Default disk size in MB
    pub disk_size: u32,
    /// Guest hostname
    pub hostname: String,
    /// Default account name
    pub username: String,
    /// Default account password
    pub password: String,
    /// Available series with descriptions
    pub series_options: Vec<SeriesInfo>,
}

impl ConfigInitContext {
    /// Starter-config values for the given box name and series
    pub fn new(name: &str, series: UbuntuSeries) -> Self {
        let vm = VmConfig::default();
        let ssh = SshConfig::default();

        Self {
            name: name.to_string(),
            series: series.to_string(),
            version: series.default_point_release().to_string(),
            cpus: vm.cpus,
            memory: vm.memory,
            disk_size: vm.disk_size,
            hostname: name.to_string(),
            username: ssh.username,
            password: ssh.password,
            series_options: Self::series_options(),
        }
    }

    fn series_options() -> Vec<SeriesInfo> {
        [UbuntuSeries::Noble, UbuntuSeries::Jammy]
            .iter()
            .map(|s| SeriesInfo {
                name: s.to_string(),
                version: s.default_point_release().to_string(),
                description: format!("Ubuntu {} ({})", s.release(), s.title()),
            })
            .collect()
    }

    /// Serialize into a Tera rendering context
    pub fn to_tera_context(&self) -> Result<Context> {
        Ok(Context::from_serialize(self)?)
    }
}
