//! Desired-state document builder

use amp_spec::{ApiManager, LocalObjectReference, ResourceRequirements};

use crate::TEST_NAMESPACE;

/// Builder for [`ApiManager`] documents with test-friendly defaults.
///
/// # Example
///
/// ```
/// use amp_test_utils::ApiManagerBuilder;
///
/// let apimanager = ApiManagerBuilder::new()
///     .resource_requirements_enabled(false)
///     .external_zync_database(true)
///     .build();
/// assert!(apimanager.is_zync_external_database_enabled());
/// ```
pub struct ApiManagerBuilder {
    apimanager: ApiManager,
}

impl ApiManagerBuilder {
    pub fn new() -> Self {
        Self {
            apimanager: ApiManager::new("example-apimanager", TEST_NAMESPACE),
        }
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.apimanager.metadata.namespace = Some(namespace.to_string());
        self
    }

    pub fn app_label(mut self, label: &str) -> Self {
        self.apimanager.spec.app_label = label.to_string();
        self
    }

    pub fn resource_requirements_enabled(mut self, enabled: bool) -> Self {
        self.apimanager.spec.resource_requirements_enabled = enabled;
        self
    }

    pub fn external_zync_database(mut self, enabled: bool) -> Self {
        self.apimanager.spec.external_components.zync.database = enabled;
        self
    }

    pub fn image_pull_secrets(mut self, names: &[&str]) -> Self {
        self.apimanager.spec.image_pull_secrets =
            Some(names.iter().map(|n| LocalObjectReference::new(*n)).collect());
        self
    }

    pub fn zync_resources(mut self, resources: ResourceRequirements) -> Self {
        self.apimanager.spec.zync.app_spec.resources = Some(resources);
        self
    }

    pub fn zync_que_resources(mut self, resources: ResourceRequirements) -> Self {
        self.apimanager.spec.zync.que_spec.resources = Some(resources);
        self
    }

    pub fn zync_database_resources(mut self, resources: ResourceRequirements) -> Self {
        self.apimanager.spec.zync.database_resources = Some(resources);
        self
    }

    pub fn zync_image(mut self, image: &str) -> Self {
        self.apimanager.spec.zync.image = Some(image.to_string());
        self
    }

    pub fn apicast_image(mut self, image: &str) -> Self {
        self.apimanager.spec.apicast.image = Some(image.to_string());
        self
    }

    pub fn zync_replicas(mut self, app: i32, que: i32) -> Self {
        self.apimanager.spec.zync.app_spec.replicas = app;
        self.apimanager.spec.zync.que_spec.replicas = que;
        self
    }

    pub fn apicast_production_resources(mut self, resources: ResourceRequirements) -> Self {
        self.apimanager.spec.apicast.production_spec.resources = Some(resources);
        self
    }

    pub fn build(self) -> ApiManager {
        self.apimanager
    }
}

impl Default for ApiManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
