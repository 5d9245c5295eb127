//! APIcast options resolver

use amp_spec::ApiManager;

use crate::component::apicast::{
    APICAST_COMPONENT, APICAST_PRODUCTION_COMPONENT, APICAST_STAGING_COMPONENT, ApicastOptions,
    default_production_resource_requirements, default_staging_resource_requirements,
};
use crate::images::{AmpImagesOptionsProvider, ImageReference};
use crate::labels::{self, ComponentType};
use crate::product::THREESCALE_RELEASE;
use crate::provider::{OptionsProvider, resolve_resource_requirements};
use crate::validation::Validate;
use crate::{Result, ResultExt};

const STAGING_ELEMENT: &str = "staging";
const PRODUCTION_ELEMENT: &str = "production";

/// Resolves [`ApicastOptions`] for one namespace. Reads no secrets.
pub struct ApicastOptionsProvider<'a> {
    apimanager: &'a ApiManager,
    namespace: String,
}

impl<'a> ApicastOptionsProvider<'a> {
    pub fn new(apimanager: &'a ApiManager, namespace: impl Into<String>) -> Self {
        Self {
            apimanager,
            namespace: namespace.into(),
        }
    }

    pub fn get_apicast_options(&self) -> Result<ApicastOptions> {
        tracing::debug!(namespace = %self.namespace, "Resolving apicast options");
        let apicast = &self.apimanager.spec.apicast;

        let mut options = ApicastOptions {
            image_tag: THREESCALE_RELEASE.to_string(),
            management_api: apicast.management_api.clone(),
            openssl_verify: apicast.openssl_verify.to_string(),
            response_codes: apicast.response_codes.to_string(),
            ..Default::default()
        };

        self.set_resource_requirements_options(&mut options);

        options.staging_affinity = apicast.staging_spec.affinity.clone();
        options.staging_tolerations = apicast.staging_spec.tolerations.clone();
        options.production_affinity = apicast.production_spec.affinity.clone();
        options.production_tolerations = apicast.production_spec.tolerations.clone();

        options.staging_replicas = apicast.staging_spec.replicas;
        options.production_replicas = apicast.production_spec.replicas;

        let image = AmpImagesOptionsProvider::new(self.apimanager)
            .get_apicast_image()
            .context("reading apicast image options")?;
        self.set_labels(&mut options, &image);

        options.apicast_metrics = true;
        options.namespace = self.namespace.clone();

        options.validate().context("validating apicast options")?;
        Ok(options)
    }

    fn set_resource_requirements_options(&self, options: &mut ApicastOptions) {
        let spec = &self.apimanager.spec;
        options.staging_resource_requirements = resolve_resource_requirements(
            spec.resource_requirements_enabled,
            default_staging_resource_requirements,
            spec.apicast.staging_spec.resources.as_ref(),
        );
        options.production_resource_requirements = resolve_resource_requirements(
            spec.resource_requirements_enabled,
            default_production_resource_requirements,
            spec.apicast.production_spec.resources.as_ref(),
        );
    }

    fn set_labels(&self, options: &mut ApicastOptions, image: &ImageReference) {
        let common = labels::common_labels(&self.apimanager.spec.app_label, APICAST_COMPONENT);
        let staging = labels::tier_labels(&common, STAGING_ELEMENT);
        let production = labels::tier_labels(&common, PRODUCTION_ELEMENT);
        let version = image.version();

        options.staging_pod_template_labels = labels::pod_template_labels(
            APICAST_STAGING_COMPONENT,
            version,
            ComponentType::Application,
            &staging,
        );
        options.production_pod_template_labels = labels::pod_template_labels(
            APICAST_PRODUCTION_COMPONENT,
            version,
            ComponentType::Application,
            &production,
        );

        options.common_staging_labels = staging;
        options.common_production_labels = production;
        options.common_labels = common;
    }
}

impl OptionsProvider for ApicastOptionsProvider<'_> {
    type Options = ApicastOptions;

    fn component(&self) -> &'static str {
        APICAST_COMPONENT
    }

    fn get_options(&self) -> Result<ApicastOptions> {
        self.get_apicast_options()
    }
}
