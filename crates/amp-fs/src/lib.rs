//! Filesystem helpers for the API management operator
//!
//! Provides format-agnostic document loading (used for desired-state specs)
//! and atomic writes (used by the file-backed secret store).

pub mod config;
pub mod error;
pub mod io;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use io::FileLock;
