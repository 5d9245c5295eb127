//! Desired-state spec types for the API management operator.
//!
//! The [`ApiManager`] document is the user-authored description of a whole
//! deployment. Resolvers only ever read it; serde defaults fill in the values
//! that are guaranteed to be present by the time resolution starts (replica
//! counts, the app label, the resource-requirements toggle).

pub mod apimanager;
pub mod k8s;

pub use apimanager::{
    ApiManager, ApiManagerSpec, ApicastSpec, DEFAULT_APP_LABEL, DeploymentSpec,
    ExternalComponentsSpec, ExternalZyncSpec, ZyncSpec,
};
pub use k8s::{Affinity, LocalObjectReference, ObjectMeta, ResourceRequirements, Toleration};
