//! Per-subsystem option resolvers

pub mod apicast;
pub mod zync;

use amp_spec::ResourceRequirements;
use serde::Serialize;

use crate::Result;
use crate::validation::Validate;

pub use apicast::ApicastOptionsProvider;
pub use zync::ZyncOptionsProvider;

/// A resolver producing the validated options record of one subsystem.
pub trait OptionsProvider {
    type Options: Validate + Serialize;

    /// Subsystem name, e.g. `zync`
    fn component(&self) -> &'static str;

    fn get_options(&self) -> Result<Self::Options>;
}

/// Resource requirements of one container.
///
/// An explicit per-container value in the spec wins. Otherwise the computed
/// default applies when requirements are enabled globally, and the result is
/// empty when they are not.
pub fn resolve_resource_requirements(
    enabled: bool,
    default: fn() -> ResourceRequirements,
    explicit: Option<&ResourceRequirements>,
) -> ResourceRequirements {
    match explicit {
        Some(requirements) => requirements.clone(),
        None if enabled => default(),
        None => ResourceRequirements::default(),
    }
}
