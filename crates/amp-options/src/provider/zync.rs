//! Zync options resolver

use amp_secrets::{SecretSource, SecretStore};
use amp_spec::{ApiManager, LocalObjectReference};

use crate::component::zync::{
    ZYNC_COMPONENT, ZYNC_DATABASE_COMPONENT, ZYNC_QUE_COMPONENT, ZYNC_SECRET_AUTHENTICATION_TOKEN_FIELD_NAME,
    ZYNC_SECRET_DATABASE_PASSWORD_FIELD_NAME, ZYNC_SECRET_DATABASE_URL_FIELD_NAME,
    ZYNC_SECRET_KEY_BASE_FIELD_NAME, ZYNC_SECRET_NAME, ZyncOptions,
    default_zync_authentication_token, default_zync_container_resource_requirements,
    default_zync_database_container_resource_requirements, default_zync_database_password,
    default_zync_database_url, default_zync_que_container_resource_requirements,
    default_zync_que_service_account_image_pull_secrets, default_zync_secret_key_base,
};
use crate::consistency::{UrlPasswordFields, validate_url_password};
use crate::images::{AmpImagesOptionsProvider, ZyncImagesOptions};
use crate::labels::{self, ComponentType};
use crate::product::THREESCALE_RELEASE;
use crate::provider::{OptionsProvider, resolve_resource_requirements};
use crate::secret_table::{
    PlannedField, SecretField, never, plan_secret_fields, resolve_secret_fields,
};
use crate::validation::Validate;
use crate::{Result, ResultExt};

const ZYNC_ELEMENT: &str = "zync";
const ZYNC_QUE_ELEMENT: &str = "zync-que";
const ZYNC_DATABASE_ELEMENT: &str = "database";

fn external_database(apimanager: &ApiManager) -> bool {
    apimanager.is_zync_external_database_enabled()
}

/// Secret-backed zync fields, in resolution order.
///
/// The database URL comes after the password so its default embeds the
/// password that was actually resolved.
pub const ZYNC_SECRET_FIELDS: &[SecretField<ZyncOptions>] = &[
    SecretField {
        option: "database_password",
        secret: ZYNC_SECRET_NAME,
        field: ZYNC_SECRET_DATABASE_PASSWORD_FIELD_NAME,
        default: |_| default_zync_database_password(),
        required_if: external_database,
        assign: |o, v| o.database_password = v,
    },
    SecretField {
        option: "secret_key_base",
        secret: ZYNC_SECRET_NAME,
        field: ZYNC_SECRET_KEY_BASE_FIELD_NAME,
        default: |_| default_zync_secret_key_base(),
        required_if: never,
        assign: |o, v| o.secret_key_base = v,
    },
    SecretField {
        option: "authentication_token",
        secret: ZYNC_SECRET_NAME,
        field: ZYNC_SECRET_AUTHENTICATION_TOKEN_FIELD_NAME,
        default: |_| default_zync_authentication_token(),
        required_if: never,
        assign: |o, v| o.authentication_token = v,
    },
    SecretField {
        option: "database_url",
        secret: ZYNC_SECRET_NAME,
        field: ZYNC_SECRET_DATABASE_URL_FIELD_NAME,
        default: |o| default_zync_database_url(&o.database_password),
        required_if: external_database,
        assign: |o, v| o.database_url = v,
    },
];

const DATABASE_URL_FIELDS: UrlPasswordFields<'static> = UrlPasswordFields {
    secret: ZYNC_SECRET_NAME,
    url_field: ZYNC_SECRET_DATABASE_URL_FIELD_NAME,
    password_field: ZYNC_SECRET_DATABASE_PASSWORD_FIELD_NAME,
};

/// Resolves [`ZyncOptions`] for one namespace.
pub struct ZyncOptionsProvider<'a> {
    apimanager: &'a ApiManager,
    namespace: String,
    secret_source: SecretSource<'a>,
}

impl<'a> ZyncOptionsProvider<'a> {
    pub fn new(
        apimanager: &'a ApiManager,
        namespace: impl Into<String>,
        store: &'a dyn SecretStore,
    ) -> Self {
        let namespace = namespace.into();
        Self {
            apimanager,
            secret_source: SecretSource::new(store, namespace.clone()),
            namespace,
        }
    }

    /// Resolve, persist generated secrets, and validate.
    pub fn get_zync_options(&self) -> Result<ZyncOptions> {
        tracing::debug!(namespace = %self.namespace, "Resolving zync options");

        let mut options = ZyncOptions {
            image_tag: THREESCALE_RELEASE.to_string(),
            database_image_tag: THREESCALE_RELEASE.to_string(),
            ..Default::default()
        };

        self.set_secret_based_options(&mut options)
            .context("reading zync secret options")?;
        self.set_resource_requirements_options(&mut options);
        self.set_node_affinity_and_tolerations_options(&mut options);
        self.set_replicas(&mut options);

        let images = AmpImagesOptionsProvider::new(self.apimanager)
            .get_zync_images_options()
            .context("reading zync image options")?;
        self.set_labels(&mut options, &images);

        options.zync_metrics = true;
        options.zync_que_service_account_image_pull_secrets =
            self.zync_que_service_account_image_pull_secrets();
        options.namespace = self.namespace.clone();

        options.validate().context("validating zync options")?;
        tracing::debug!(namespace = %self.namespace, "Resolved zync options");
        Ok(options)
    }

    /// Which secret fields resolution would generate, without writing them.
    pub fn plan_secret_writes(&self) -> Result<Vec<PlannedField>> {
        plan_secret_fields(ZYNC_SECRET_FIELDS, self.apimanager, &self.secret_source)
            .context("planning zync secret options")
    }

    fn set_secret_based_options(&self, options: &mut ZyncOptions) -> Result<()> {
        resolve_secret_fields(ZYNC_SECRET_FIELDS, self.apimanager, &self.secret_source, options)?;
        validate_url_password(DATABASE_URL_FIELDS, &options.database_url, &options.database_password)
    }

    fn set_resource_requirements_options(&self, options: &mut ZyncOptions) {
        let spec = &self.apimanager.spec;
        let enabled = spec.resource_requirements_enabled;

        options.container_resource_requirements = resolve_resource_requirements(
            enabled,
            default_zync_container_resource_requirements,
            spec.zync.app_spec.resources.as_ref(),
        );
        options.que_container_resource_requirements = resolve_resource_requirements(
            enabled,
            default_zync_que_container_resource_requirements,
            spec.zync.que_spec.resources.as_ref(),
        );
        options.database_container_resource_requirements = resolve_resource_requirements(
            enabled,
            default_zync_database_container_resource_requirements,
            spec.zync.database_resources.as_ref(),
        );
    }

    fn set_node_affinity_and_tolerations_options(&self, options: &mut ZyncOptions) {
        let zync = &self.apimanager.spec.zync;
        options.zync_affinity = zync.app_spec.affinity.clone();
        options.zync_tolerations = zync.app_spec.tolerations.clone();
        options.zync_que_affinity = zync.que_spec.affinity.clone();
        options.zync_que_tolerations = zync.que_spec.tolerations.clone();
        options.zync_database_affinity = zync.database_affinity.clone();
        options.zync_database_tolerations = zync.database_tolerations.clone();
    }

    fn set_replicas(&self, options: &mut ZyncOptions) {
        options.zync_replicas = self.apimanager.spec.zync.app_spec.replicas;
        options.zync_que_replicas = self.apimanager.spec.zync.que_spec.replicas;
    }

    fn set_labels(&self, options: &mut ZyncOptions, images: &ZyncImagesOptions) {
        let common = labels::common_labels(&self.apimanager.spec.app_label, ZYNC_COMPONENT);
        let zync = labels::tier_labels(&common, ZYNC_ELEMENT);
        let que = labels::tier_labels(&common, ZYNC_QUE_ELEMENT);
        let database = labels::tier_labels(&common, ZYNC_DATABASE_ELEMENT);

        let zync_version = images.zync_image.version();
        let database_version = images.zync_database_postgresql_image.version();

        options.zync_pod_template_labels = labels::pod_template_labels(
            ZYNC_COMPONENT,
            zync_version,
            ComponentType::Application,
            &zync,
        );
        options.zync_que_pod_template_labels = labels::pod_template_labels(
            ZYNC_QUE_COMPONENT,
            zync_version,
            ComponentType::Application,
            &que,
        );
        options.zync_database_pod_template_labels = labels::pod_template_labels(
            ZYNC_DATABASE_COMPONENT,
            database_version,
            ComponentType::Application,
            &database,
        );

        options.common_zync_labels = zync;
        options.common_zync_que_labels = que;
        options.common_zync_database_labels = database;
        options.common_labels = common;
    }

    fn zync_que_service_account_image_pull_secrets(&self) -> Vec<LocalObjectReference> {
        self.apimanager
            .spec
            .image_pull_secrets
            .clone()
            .unwrap_or_else(default_zync_que_service_account_image_pull_secrets)
    }
}

impl OptionsProvider for ZyncOptionsProvider<'_> {
    type Options = ZyncOptions;

    fn component(&self) -> &'static str {
        ZYNC_COMPONENT
    }

    fn get_options(&self) -> Result<ZyncOptions> {
        self.get_zync_options()
    }
}
