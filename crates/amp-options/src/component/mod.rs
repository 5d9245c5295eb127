//! Resolved options records and their default generators
//!
//! Field names and grouping of the options types are the contract consumed by
//! manifest renderers.

pub mod apicast;
pub mod zync;

pub use apicast::ApicastOptions;
pub use zync::ZyncOptions;
