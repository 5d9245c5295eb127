//! The `ApiManager` desired-state document
//!
//! Field names follow the camelCase wire format users author. Defaults are
//! applied at deserialization time so that every value a resolver treats as
//! non-nullable (replicas, app label, toggles) is already populated.

use serde::{Deserialize, Serialize};

use crate::k8s::{Affinity, LocalObjectReference, ObjectMeta, ResourceRequirements, Toleration};

/// Value of the `app` label when the spec does not set one.
pub const DEFAULT_APP_LABEL: &str = "3scale-api-management";

fn default_app_label() -> String {
    DEFAULT_APP_LABEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_replicas() -> i32 {
    1
}

fn default_management_api() -> String {
    "status".to_string()
}

/// Top-level desired-state document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiManager {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ApiManagerSpec,
}

impl ApiManager {
    /// Create a spec document with all defaults for `name` in `namespace`.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.into(),
                namespace: Some(namespace.into()),
            },
            spec: ApiManagerSpec::default(),
        }
    }

    /// Namespace declared in the document metadata, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    /// Whether the zync database is managed outside the operator.
    ///
    /// When set, database credentials must already exist in the secret store.
    pub fn is_zync_external_database_enabled(&self) -> bool {
        self.spec.external_components.zync.database
    }
}

/// Whole-application spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiManagerSpec {
    /// Value of the `app` label on every generated object
    #[serde(default = "default_app_label")]
    pub app_label: String,

    /// Global toggle for computed default resource requirements
    #[serde(default = "default_true")]
    pub resource_requirements_enabled: bool,

    /// Image pull secrets; `None` selects the computed default set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<LocalObjectReference>>,

    #[serde(default)]
    pub apicast: ApicastSpec,

    #[serde(default)]
    pub zync: ZyncSpec,

    #[serde(default)]
    pub external_components: ExternalComponentsSpec,
}

impl Default for ApiManagerSpec {
    fn default() -> Self {
        Self {
            app_label: default_app_label(),
            resource_requirements_enabled: true,
            image_pull_secrets: None,
            apicast: ApicastSpec::default(),
            zync: ZyncSpec::default(),
            external_components: ExternalComponentsSpec::default(),
        }
    }
}

/// Per-deployment overrides shared by every tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// Explicit resource requirements; wins over the global toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

impl Default for DeploymentSpec {
    fn default() -> Self {
        Self {
            replicas: default_replicas(),
            resources: None,
            affinity: None,
            tolerations: Vec::new(),
        }
    }
}

/// Zync: application tier, que worker and database.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZyncSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(
        default,
        rename = "postgreSQLImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub postgresql_image: Option<String>,

    #[serde(default)]
    pub app_spec: DeploymentSpec,

    #[serde(default)]
    pub que_spec: DeploymentSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_affinity: Option<Affinity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub database_tolerations: Vec<Toleration>,
}

/// APIcast gateway: staging and production deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApicastSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Scope of the management API (`disabled`, `status`, `policies`, `debug`)
    #[serde(default = "default_management_api", rename = "managementAPI")]
    pub management_api: String,

    #[serde(default, rename = "openSSLVerify")]
    pub openssl_verify: bool,

    #[serde(default = "default_true")]
    pub response_codes: bool,

    #[serde(default)]
    pub staging_spec: DeploymentSpec,

    #[serde(default)]
    pub production_spec: DeploymentSpec,
}

impl Default for ApicastSpec {
    fn default() -> Self {
        Self {
            image: None,
            management_api: default_management_api(),
            openssl_verify: false,
            response_codes: true,
            staging_spec: DeploymentSpec::default(),
            production_spec: DeploymentSpec::default(),
        }
    }
}

/// Components whose backing services are managed outside the operator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalComponentsSpec {
    #[serde(default)]
    pub zync: ExternalZyncSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalZyncSpec {
    /// Use an externally managed zync database
    #[serde(default)]
    pub database: bool,
}
