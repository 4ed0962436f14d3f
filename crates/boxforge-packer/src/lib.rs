//! # boxforge-packer
//!
//! Generates Packer workspaces for Ubuntu arm64 Parallels boxes and drives
//! the packer CLI through the init, validate, build sequence.
//!
//! A workspace is rendered from templates embedded in the binary, so a
//! scaffold is self-contained: the Packer template, the subiquity
//! autoinstall seed served over HTTP during the install, a Vagrantfile for
//! the finished box, an import script, and a README. Builds stream packer's
//! output straight to the terminal.

pub mod builder;
pub mod scaffold;
pub mod templates;
pub mod types;
pub mod utils;

pub use builder::ParallelsBuilder;
pub use scaffold::{write_workspace, ScaffoldFile};
pub use templates::{TemplateRegistry, TEMPLATE_FILE};
pub use types::{BuildOptions, BuildResult, OnErrorBehavior, PrerequisiteStatus, ValidationResult};
pub use utils::check_prerequisites;
