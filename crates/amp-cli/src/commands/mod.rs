//! Command implementations for amp-cli

pub mod components;
pub mod resolve;
pub mod rules;

pub use components::run_components;
pub use resolve::{ResolveArgs, run_resolve};
pub use rules::run_rules;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Encode a value for stdout.
pub(crate) fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text)
}
