//! # boxforge-vagrant
//!
//! Thin wrappers around the vagrant CLI: box registry operations and
//! machine lifecycle (up, ssh, halt, destroy, status) against a scaffolded
//! workspace directory.

pub mod boxes;
pub mod machine;
pub mod utils;

pub use boxes::{box_add, box_present, box_remove};
pub use machine::{MachineState, VagrantMachine};
pub use utils::{ensure_vagrant, parallels_plugin_installed};
