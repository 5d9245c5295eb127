//! APIcast gateway: staging and production deployments

use amp_spec::{Affinity, ResourceRequirements, Toleration};
use serde::Serialize;

use crate::Result;
use crate::labels::LabelMap;
use crate::validation::{Checker, Validate};

pub const APICAST_COMPONENT: &str = "apicast";
pub const APICAST_STAGING_COMPONENT: &str = "apicast-staging";
pub const APICAST_PRODUCTION_COMPONENT: &str = "apicast-production";

/// Resolved configuration for the APIcast subsystem.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApicastOptions {
    pub image_tag: String,

    pub management_api: String,
    pub openssl_verify: String,
    pub response_codes: String,

    pub staging_resource_requirements: ResourceRequirements,
    pub production_resource_requirements: ResourceRequirements,

    pub staging_affinity: Option<Affinity>,
    pub staging_tolerations: Vec<Toleration>,
    pub production_affinity: Option<Affinity>,
    pub production_tolerations: Vec<Toleration>,

    pub staging_replicas: i32,
    pub production_replicas: i32,

    pub common_labels: LabelMap,
    pub common_staging_labels: LabelMap,
    pub common_production_labels: LabelMap,
    pub staging_pod_template_labels: LabelMap,
    pub production_pod_template_labels: LabelMap,

    pub apicast_metrics: bool,

    pub namespace: String,
}

impl Validate for ApicastOptions {
    fn validate(&self) -> Result<()> {
        let check = Checker::new("ApicastOptions");
        check.required("image_tag", &self.image_tag)?;
        check.required("management_api", &self.management_api)?;
        check.required("openssl_verify", &self.openssl_verify)?;
        check.required("response_codes", &self.response_codes)?;
        check.replicas("staging_replicas", self.staging_replicas)?;
        check.replicas("production_replicas", self.production_replicas)?;
        check.labels("common_labels", &self.common_labels)?;
        check.required("namespace", &self.namespace)?;
        Ok(())
    }
}

pub fn default_staging_resource_requirements() -> ResourceRequirements {
    ResourceRequirements::default()
        .with_limit("cpu", "100m")
        .with_limit("memory", "128Mi")
        .with_request("cpu", "50m")
        .with_request("memory", "64Mi")
}

pub fn default_production_resource_requirements() -> ResourceRequirements {
    ResourceRequirements::default()
        .with_limit("cpu", "1")
        .with_limit("memory", "128Mi")
        .with_request("cpu", "500m")
        .with_request("memory", "64Mi")
}
