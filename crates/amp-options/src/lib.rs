//! Options resolution and consistency validation for API management subsystems.
//!
//! A resolver turns one [`amp_spec::ApiManager`] document, a target namespace
//! and a secret store into a fully populated, validated options record for a
//! single subsystem:
//!
//! - [`ZyncOptionsProvider`] for zync (app, que worker, database)
//! - [`ApicastOptionsProvider`] for the APIcast gateway
//!
//! Secret-backed fields are declared in tables ([`secret_table`]) and go
//! through the two-phase contract of [`amp_secrets::SecretSource`]. Derived
//! values that must agree with each other are checked by [`consistency`].
//! Every failure carries the name of the pipeline step that produced it and
//! can be classified with [`Error::kind`].

pub mod component;
pub mod consistency;
pub mod defaults;
pub mod error;
pub mod images;
pub mod labels;
pub mod product;
pub mod provider;
pub mod secret_table;
pub mod validation;

pub use component::{ApicastOptions, ZyncOptions};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use labels::LabelMap;
pub use provider::{
    ApicastOptionsProvider, OptionsProvider, ZyncOptionsProvider, resolve_resource_requirements,
};
pub use secret_table::PlannedField;
pub use validation::Validate;
