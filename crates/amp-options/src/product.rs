//! Release identity of the operator build

/// Release identifier stamped into image tags.
pub const THREESCALE_RELEASE: &str = "2.11";

/// Product version reported in metering labels.
pub const PRODUCT_VERSION: &str = THREESCALE_RELEASE;
