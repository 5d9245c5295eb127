//! The rules command

use amp_rules::{RuleBundle, RuleFactoryRegistry};
use serde::Serialize;

use super::render;
use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

/// A bundle as printed, annotated with the checksum of its YAML encoding.
#[derive(Debug, Serialize)]
struct BundleOutput<'a> {
    #[serde(flatten)]
    bundle: &'a RuleBundle,
    checksum: String,
}

pub fn run_rules(
    registry: &RuleFactoryRegistry,
    component: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let bundles = match component {
        Some(name) => vec![registry.bundle(name).ok_or_else(|| {
            CliError::user(format!(
                "no rule factory for '{name}'. Registered: {}",
                registry.subsystems().join(", ")
            ))
        })?],
        None => registry.bundles(),
    };

    let output = bundles
        .iter()
        .map(|bundle| -> Result<BundleOutput<'_>> {
            Ok(BundleOutput {
                checksum: bundle.checksum()?,
                bundle,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    println!("{}", render(&output, format)?);
    Ok(())
}
