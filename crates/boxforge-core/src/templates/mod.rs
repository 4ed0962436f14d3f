//! Template rendering for config generation
//!
//! A single Tera template produces the commented starter boxforge.yaml
//! written by `boxforge config init`.

mod context;

pub use context::{ConfigInitContext, SeriesInfo};

use anyhow::Result;
use tera::Tera;
use tracing::debug;

const CONFIG_TEMPLATE: &str = "boxforge.yaml";

/// Renders the starter configuration file
pub struct ConfigTemplateRegistry {
    tera: Tera,
}

impl ConfigTemplateRegistry {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(CONFIG_TEMPLATE, include_str!("boxforge.yaml.tera"))?;
        Ok(Self { tera })
    }

    /// Render the starter boxforge.yaml for the given box name and series
    pub fn render_config(&self, context: &ConfigInitContext) -> Result<String> {
        debug!("Rendering starter config for series: {}", context.series);
        let tera_context = context.to_tera_context()?;
        Ok(self.tera.render(CONFIG_TEMPLATE, &tera_context)?)
    }
}
