//! Configuration for tablegrid.
//!
//! The config file is KDL, decoded with `knuffel`. Every node is optional; a missing node falls
//! back to the defaults the layout has always used (5 pixels of spacing between cells and 5 pixels
//! of padding around the table).

use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

pub mod layout;

pub use crate::layout::{Layout, PaddingConfig, Pixels, SpacingConfig};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub layout: Layout,
    #[knuffel(child, default)]
    pub debug: DebugConfig,
}

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct DebugConfig {
    /// Overrides the default log filter. `RUST_LOG` still wins when set.
    #[knuffel(child, unwrap(argument))]
    pub log_filter: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("config.kdl");

        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}
