//! Configuration file loading and parsing

use crate::error::{Error, Result};
use crate::schema::SchemaValidator;
use crate::templates::{ConfigInitContext, ConfigTemplateRegistry};
use crate::types::{ForgeConfigFile, UbuntuSeries};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File names probed during discovery, in preference order
const CONFIG_FILE_NAMES: &[&str] = &["boxforge.yaml", "boxforge.yml"];

/// A parsed boxforge.yaml plus where it came from
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// Parsed document
    pub config: ForgeConfigFile,

    /// File the document was loaded from
    pub config_path: Utf8PathBuf,

    /// The config file's directory; relative paths resolve against it
    pub working_dir: Utf8PathBuf,
}

impl ForgeConfig {
    /// Load the config at `path`, or discover one by walking up from the
    /// current directory when no path is given
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = Self::read_config(path)?;
        Self::from_parts(config_path, &content)
    }

    /// Like [`load`](Self::load), but schema-checks the raw document before
    /// deserializing it
    pub fn load_and_validate(path: Option<&Utf8Path>, validator: &SchemaValidator) -> Result<Self> {
        let (config_path, content) = Self::read_config(path)?;
        validator.validate_yaml(&content)?;
        Self::from_parts(config_path, &content)
    }

    fn from_parts(config_path: Utf8PathBuf, content: &str) -> Result<Self> {
        let working_dir = config_path
            .parent()
            .map(|p| p.to_owned())
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        let config: ForgeConfigFile = serde_yaml_ng::from_str(content)?;

        Ok(Self {
            config,
            config_path,
            working_dir,
        })
    }

    fn read_config(path: Option<&Utf8Path>) -> Result<(Utf8PathBuf, String)> {
        let Some(p) = path else {
            return Self::find_config();
        };

        let content = fs::read_to_string(p).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::config_not_found(p.as_str()),
            _ => Error::Io(e),
        })?;
        Ok((p.to_owned(), content))
    }

    /// Walk from the current directory toward the root until a config file
    /// turns up
    fn find_config() -> Result<(Utf8PathBuf, String)> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory is not valid UTF-8"))?;

        let mut dir = Some(cwd.as_path());
        while let Some(current) = dir {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    let content = fs::read_to_string(&candidate)?;
                    return Ok((candidate, content));
                }
            }
            dir = current.parent();
        }

        Err(Error::config_not_found(
            "boxforge.yaml (searched current and parent directories)",
        ))
    }

    /// Default config document for the given box name and series
    pub fn new_default(name: &str, series: UbuntuSeries) -> ForgeConfigFile {
        ForgeConfigFile {
            version: "1.0".to_string(),
            name: name.to_string(),
            ubuntu: crate::types::UbuntuConfig {
                series,
                ..Default::default()
            },
            vm: Default::default(),
            ssh: Default::default(),
            provision: Default::default(),
            output: Default::default(),
        }
    }

    /// Borrow the parsed document
    pub fn inner(&self) -> &ForgeConfigFile {
        &self.config
    }

    /// Workspace and box name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Ubuntu release series
    pub fn series(&self) -> UbuntuSeries {
        self.config.ubuntu.series
    }

    /// Directory the scaffold is written into, resolved against the config
    /// file's location
    pub fn workspace_dir(&self) -> Utf8PathBuf {
        let dir = self
            .config
            .output
            .directory
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(&self.config.name));

        if dir.is_absolute() {
            dir
        } else {
            self.working_dir.join(dir)
        }
    }

    /// Path of the box artifact the vagrant post-processor produces
    pub fn box_path(&self) -> Utf8PathBuf {
        self.workspace_dir()
            .join("builds")
            .join(self.config.box_file_name())
    }

    /// Render the document back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(&self.config).map_err(Error::from)
    }

    /// Write the document back to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        fs::write(&self.config_path, self.to_yaml()?)?;
        Ok(())
    }
}

/// Render the commented starter boxforge.yaml that `config init` writes
pub fn generate_config(name: &str, series: UbuntuSeries) -> Result<String> {
    let registry = ConfigTemplateRegistry::new().map_err(|e| Error::Template(e.to_string()))?;
    let context = ConfigInitContext::new(name, series);
    registry
        .render_config(&context)
        .map_err(|e| Error::Template(e.to_string()))
}
