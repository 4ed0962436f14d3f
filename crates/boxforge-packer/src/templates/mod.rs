//! Embedded Tera templates for generated Packer workspaces
//!
//! A workspace is six files: the Packer template itself, the autoinstall
//! seed pair served over HTTP during the build, a Vagrantfile for the
//! finished box, an import script, and a README. All of them render from
//! templates embedded in the binary, so a scaffold never depends on files
//! shipped next to the executable.

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use tera::{Tera, Value};
use tracing::debug;

use boxforge_core::types::ForgeConfigFile;

use crate::scaffold::ScaffoldFile;

/// File name of the rendered Packer template inside a workspace.
pub const TEMPLATE_FILE: &str = "ubuntu.pkr.hcl";

// GRUB console boot sequence for the arm64 live-server ISO. The golang-style
// `{{ .HTTPIP }}` placeholders belong to packer and are expanded at boot
// time; they stay intact here because these lines enter the template as
// context values, never as template source.
const BOOT_COMMAND: &[&str] = &[
    "<wait>c<wait>",
    "linux /casper/vmlinuz --- autoinstall 'ds=nocloud-net;s=http://{{ .HTTPIP }}:{{ .HTTPPort }}/'<enter><wait>",
    "initrd /casper/initrd<enter><wait>",
    "boot<enter>",
];

// Vagrant's published insecure public keys. Both get authorized during
// provisioning so `vagrant ssh` works with old and new vagrant releases;
// vagrant rotates them out on first boot.
const VAGRANT_PUBKEY_RSA: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAABIwAAAQEA6NF8iallvQVp22WDkTkyrtvp9eWW6A8YVr+kz4TjGYe7gHzIw+niNltGEFHzD8+v1I2YJ6oXevct1YeS0o9HZyN1Q9qgCgzUFtdOKLv6IedplqoPkcmF0aYet2PkEDo3MlTBckFXPITAMzF8dJSIFo9D8HfdOV0IAdx4O7PtixWKn5y2hMNG0zQPyUecp4pzC6kivAIhyfHilFR61RGL+GPXQ2MWZWFYbAGjyiYJnAmCP3NOTd0jMZEnDkbUvxhMmBYSdETk1rRgm+R4LOzFUGaHqHDLKLX+FIPKcF96hrucXzcWyLbIbEgE98OHlnVYCzRdK8jlqm8tehUc9c9WhQ== vagrant insecure public key";
const VAGRANT_PUBKEY_ED25519: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIN1YdxBpNlzxDqfJyw/QKow1F+wvG9hXGoqiysfJOn5Y vagrant insecure public key";

// Subiquity requires identity.password to be a valid crypt string, but the
// generated user-data overrides it with a chpasswd late-command, so any
// well-formed SHA-512 hash works here.
const IDENTITY_PASSWORD_HASH: &str = "$6$exDY1mhS4KUYCE/2$zmn9ToZwTKLhCw.b4/b.ZRTIZM30JZ4QrOQ2aOXJ8yk96xpcCof0kxKwuX1kqLG/ygbJ1f8wxED22bTL4F46P0";

/// Template name, output path relative to the workspace root, executable bit.
const WORKSPACE_FILES: &[(&str, &str, bool)] = &[
    ("ubuntu.pkr.hcl.tera", TEMPLATE_FILE, false),
    ("workspace/README.md.tera", "README.md", false),
    ("workspace/Vagrantfile.tera", "Vagrantfile", false),
    ("workspace/meta-data.tera", "http/meta-data", false),
    ("workspace/setup.sh.tera", "setup.sh", true),
    ("workspace/user-data.tera", "http/user-data", false),
];

#[derive(RustEmbed)]
#[folder = "src/templates/hcl/"]
#[prefix = ""]
struct HclTemplates;

#[derive(RustEmbed)]
#[folder = "src/templates/workspace/"]
#[prefix = "workspace/"]
struct WorkspaceTemplates;

/// Registry of embedded workspace templates
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Create a new registry with all embedded templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.register_filter("to_hcl_list", to_hcl_list_filter);

        for file in HclTemplates::iter() {
            let name = file.as_ref();
            let content =
                HclTemplates::get(name).context("Failed to load embedded HCL template")?;
            let content_str = std::str::from_utf8(content.data.as_ref())
                .context("HCL template is not valid UTF-8")?;
            tera.add_raw_template(name, content_str)
                .with_context(|| format!("Failed to register template: {name}"))?;
        }

        for file in WorkspaceTemplates::iter() {
            let name = file.as_ref();
            let content =
                WorkspaceTemplates::get(name).context("Failed to load embedded template")?;
            let content_str = std::str::from_utf8(content.data.as_ref())
                .context("Workspace template is not valid UTF-8")?;
            tera.add_raw_template(name, content_str)
                .with_context(|| format!("Failed to register template: {name}"))?;
        }

        debug!(
            "Registered {} workspace templates",
            tera.get_template_names().count()
        );

        Ok(Self { tera })
    }

    /// Render just the Packer template for the given configuration
    pub fn render_template(&self, config: &ForgeConfigFile) -> Result<String> {
        let context = create_workspace_context(config)?;
        self.tera
            .render("ubuntu.pkr.hcl.tera", &context)
            .context("Failed to render Packer template")
    }

    /// Render every workspace file, sorted by output path so repeated
    /// renders of the same configuration produce identical results
    pub fn render_workspace(&self, config: &ForgeConfigFile) -> Result<Vec<ScaffoldFile>> {
        let context = create_workspace_context(config)?;

        let mut files = Vec::with_capacity(WORKSPACE_FILES.len());
        for (template, path, executable) in WORKSPACE_FILES {
            let contents = self
                .tera
                .render(template, &context)
                .with_context(|| format!("Failed to render template: {template}"))?;
            files.push(ScaffoldFile {
                relative_path: (*path).to_string(),
                contents,
                executable: *executable,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}

/// Build the Tera context shared by all workspace templates
fn create_workspace_context(config: &ForgeConfigFile) -> Result<tera::Context> {
    let mut context = tera::Context::new();

    context.insert("name", &config.name);
    context.insert("vm_name", config.vm_name());
    context.insert("hostname", config.hostname());
    context.insert("box_name", &config.name);
    context.insert("box_file", &config.box_file_name());
    context.insert("template_file", TEMPLATE_FILE);

    context.insert("ubuntu_series", &config.ubuntu.series.to_string());
    context.insert("ubuntu_version", config.ubuntu.resolved_version());
    context.insert("iso_url", &config.ubuntu.resolved_iso_url());
    context.insert("iso_checksum", &config.ubuntu.resolved_iso_checksum());

    context.insert("cpus", &config.vm.cpus);
    context.insert("memory", &config.vm.memory);
    context.insert("disk_size", &config.vm.disk_size);
    context.insert("boot_wait", &config.vm.boot_wait);
    context.insert("boot_command", BOOT_COMMAND);

    context.insert("ssh_username", &config.ssh.username);
    context.insert("ssh_password", &config.ssh.password);
    context.insert("ssh_timeout", &config.ssh.timeout);
    context.insert("identity_password_hash", IDENTITY_PASSWORD_HASH);
    context.insert("vagrant_pubkey_rsa", VAGRANT_PUBKEY_RSA);
    context.insert("vagrant_pubkey_ed25519", VAGRANT_PUBKEY_ED25519);

    context.insert("packages", &config.provision.packages);

    Ok(context)
}

/// Convert a JSON array of strings into a multi-line HCL list literal.
/// Backslashes and double quotes in items are escaped.
fn to_hcl_list_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let arr = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("Expected an array"))?;

    if arr.is_empty() {
        return Ok(Value::String("[]".to_string()));
    }

    let items: Vec<String> = arr
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| format!("    \"{}\"", hcl_escape(s)))
        .collect();

    Ok(Value::String(format!("[\n{},\n  ]", items.join(",\n"))))
}

fn hcl_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = TemplateRegistry::new().unwrap();
        let names: Vec<_> = registry.tera.get_template_names().collect();
        assert_eq!(names.len(), WORKSPACE_FILES.len());
        assert!(names.contains(&"ubuntu.pkr.hcl.tera"));
        assert!(names.contains(&"workspace/user-data.tera"));
    }

    #[test]
    fn test_to_hcl_list_filter() {
        let args = HashMap::new();

        let value = serde_json::json!(["a", "b"]);
        let result = to_hcl_list_filter(&value, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "[\n    \"a\",\n    \"b\",\n  ]");

        let empty = serde_json::json!([]);
        let result = to_hcl_list_filter(&empty, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "[]");
    }

    #[test]
    fn test_to_hcl_list_escapes_quotes_and_backslashes() {
        let args = HashMap::new();
        let value = serde_json::json!([r#"say "hi" \now"#]);
        let result = to_hcl_list_filter(&value, &args).unwrap();
        assert!(result
            .as_str()
            .unwrap()
            .contains(r#""say \"hi\" \\now""#));
    }

    #[test]
    fn test_to_hcl_list_rejects_non_arrays() {
        let args = HashMap::new();
        let value = serde_json::json!("not an array");
        assert!(to_hcl_list_filter(&value, &args).is_err());
    }

    #[test]
    fn test_boot_command_targets_installer_seed() {
        assert!(BOOT_COMMAND
            .iter()
            .any(|line| line.contains("ds=nocloud-net")));
        assert!(BOOT_COMMAND.iter().any(|line| line.contains("autoinstall")));
    }
}
