//! Box configuration types
//!
//! This module defines the configuration structures behind boxforge.yaml:
//! the Ubuntu release to install, guest hardware sizing, credentials baked
//! into the box, and the workspace output location.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Ubuntu release series supported by the ARM64 live-server installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UbuntuSeries {
    Noble,
    Jammy,
}

impl UbuntuSeries {
    /// Base release number used in cdimage URL paths
    pub fn release(&self) -> &'static str {
        match self {
            UbuntuSeries::Noble => "24.04",
            UbuntuSeries::Jammy => "22.04",
        }
    }

    /// Latest published point release for this series
    pub fn default_point_release(&self) -> &'static str {
        match self {
            UbuntuSeries::Noble => "24.04.3",
            UbuntuSeries::Jammy => "22.04.5",
        }
    }

    /// Human-readable release name
    pub fn title(&self) -> &'static str {
        match self {
            UbuntuSeries::Noble => "Noble Numbat",
            UbuntuSeries::Jammy => "Jammy Jellyfish",
        }
    }
}

impl std::fmt::Display for UbuntuSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UbuntuSeries::Noble => write!(f, "noble"),
            UbuntuSeries::Jammy => write!(f, "jammy"),
        }
    }
}

impl std::str::FromStr for UbuntuSeries {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noble" | "24.04" => Ok(UbuntuSeries::Noble),
            "jammy" | "22.04" => Ok(UbuntuSeries::Jammy),
            _ => Err(format!("Unknown Ubuntu series: {}", s)),
        }
    }
}

/// Main boxforge configuration structure (boxforge.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfigFile {
    /// Config schema version (required)
    pub version: String,

    /// Workspace and box name (required)
    pub name: String,

    /// Ubuntu release selection
    #[serde(default)]
    pub ubuntu: UbuntuConfig,

    /// Guest hardware sizing
    #[serde(default)]
    pub vm: VmConfig,

    /// Credentials baked into the box
    #[serde(default)]
    pub ssh: SshConfig,

    /// Extra provisioning applied by the autoinstaller
    #[serde(default)]
    pub provision: ProvisionConfig,

    /// Workspace output location
    #[serde(default)]
    pub output: OutputConfig,
}

impl ForgeConfigFile {
    /// File name of the box artifact the vagrant post-processor produces,
    /// relative to the workspace's builds/ directory
    pub fn box_file_name(&self) -> String {
        format!("{}.box", self.name)
    }

    /// Guest hostname, falling back to the workspace name
    pub fn hostname(&self) -> &str {
        self.vm.hostname.as_deref().unwrap_or(&self.name)
    }

    /// Parallels VM name shown in the Parallels Desktop control center
    pub fn vm_name(&self) -> &str {
        &self.name
    }
}

/// Ubuntu release selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UbuntuConfig {
    /// Release series (noble, jammy)
    #[serde(default = "default_series")]
    pub series: UbuntuSeries,

    /// Point release used in ISO URL derivation (e.g. "24.04.3");
    /// defaults to the latest published point release of the series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Explicit installer image, overriding the derived cdimage URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_url: Option<String>,

    /// Explicit checksum (e.g. "sha256:<digest>"), overriding the
    /// published SHA256SUMS reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_checksum: Option<String>,
}

fn default_series() -> UbuntuSeries {
    UbuntuSeries::Noble
}

impl Default for UbuntuConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
            version: None,
            iso_url: None,
            iso_checksum: None,
        }
    }
}

impl UbuntuConfig {
    /// Point release, resolved against the series default
    pub fn resolved_version(&self) -> &str {
        self.version
            .as_deref()
            .unwrap_or_else(|| self.series.default_point_release())
    }

    /// Directory on cdimage.ubuntu.com holding the release artifacts
    fn release_dir(&self) -> String {
        format!(
            "https://cdimage.ubuntu.com/releases/{}/release",
            self.series
        )
    }

    /// Installer ISO URL, derived from series and point release unless
    /// explicitly overridden
    pub fn resolved_iso_url(&self) -> String {
        self.iso_url.clone().unwrap_or_else(|| {
            format!(
                "{}/ubuntu-{}-live-server-arm64.iso",
                self.release_dir(),
                self.resolved_version()
            )
        })
    }

    /// Checksum for the installer ISO. Defaults to the published SHA256SUMS
    /// file next to the ISO so fresh scaffolds never embed a stale digest.
    pub fn resolved_iso_checksum(&self) -> String {
        self.iso_checksum
            .clone()
            .unwrap_or_else(|| format!("file:{}/SHA256SUMS", self.release_dir()))
    }
}

/// Guest hardware sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmConfig {
    /// Virtual CPU count
    #[serde(default = "default_cpus")]
    pub cpus: u32,

    /// Memory in MB
    #[serde(default = "default_memory")]
    pub memory: u32,

    /// Disk size in MB
    #[serde(default = "default_disk_size")]
    pub disk_size: u32,

    /// Guest hostname (defaults to the workspace name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Delay before the installer boot command is typed
    #[serde(default = "default_boot_wait")]
    pub boot_wait: String,
}

fn default_cpus() -> u32 {
    4
}

fn default_memory() -> u32 {
    4096
}

fn default_disk_size() -> u32 {
    65536
}

fn default_boot_wait() -> String {
    "10s".to_string()
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            cpus: default_cpus(),
            memory: default_memory(),
            disk_size: default_disk_size(),
            hostname: None,
            boot_wait: default_boot_wait(),
        }
    }
}

/// Credentials baked into the box.
///
/// The vagrant/vagrant convention is deliberate: vagrant's insecure keypair
/// bootstrap expects it, and the generated workspace documents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    /// Account created by the autoinstaller
    #[serde(default = "default_ssh_username")]
    pub username: String,

    /// Password for the account
    #[serde(default = "default_ssh_password")]
    pub password: String,

    /// How long packer waits for SSH after the install finishes
    #[serde(default = "default_ssh_timeout")]
    pub timeout: String,
}

fn default_ssh_username() -> String {
    "vagrant".to_string()
}

fn default_ssh_password() -> String {
    "vagrant".to_string()
}

fn default_ssh_timeout() -> String {
    "30m".to_string()
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            username: default_ssh_username(),
            password: default_ssh_password(),
            timeout: default_ssh_timeout(),
        }
    }
}

/// Extra provisioning applied by the autoinstaller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Extra apt packages added to the autoinstall package list
    #[serde(default)]
    pub packages: Vec<String>,
}

/// Workspace output location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the scaffold is written into, relative to the config file
    /// (defaults to the workspace name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<Utf8PathBuf>,
}
