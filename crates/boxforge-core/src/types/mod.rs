//! Type definitions for boxforge configuration

mod box_config;

pub use box_config::*;
