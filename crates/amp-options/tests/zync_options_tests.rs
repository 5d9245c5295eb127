//! End-to-end zync resolution against in-memory secret stores

use amp_options::component::zync::{
    ZYNC_SECRET_DATABASE_PASSWORD_FIELD_NAME, ZYNC_SECRET_DATABASE_URL_FIELD_NAME, ZYNC_SECRET_NAME,
    default_zync_container_resource_requirements,
    default_zync_database_container_resource_requirements,
    default_zync_que_container_resource_requirements,
};
use amp_options::{Error, ErrorKind, ZyncOptionsProvider};
use amp_secrets::{MemorySecretStore, SecretStore};
use amp_spec::ResourceRequirements;
use amp_test_utils::{ApiManagerBuilder, TEST_NAMESPACE, ZyncSecretFixture, database_url};
use pretty_assertions::assert_eq;

fn stored_field(store: &MemorySecretStore, field: &str) -> Option<String> {
    store
        .read(TEST_NAMESPACE, ZYNC_SECRET_NAME)
        .unwrap()
        .and_then(|data| data.get(field).cloned())
}

#[test]
fn test_generated_url_agrees_with_generated_password() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.database_password.len(), 16);
    assert_eq!(options.database_url, database_url(&options.database_password));
    assert_eq!(
        stored_field(&store, ZYNC_SECRET_DATABASE_PASSWORD_FIELD_NAME),
        Some(options.database_password.clone())
    );
    assert_eq!(
        stored_field(&store, ZYNC_SECRET_DATABASE_URL_FIELD_NAME),
        Some(options.database_url.clone())
    );
}

#[test]
fn test_second_resolution_reuses_persisted_values() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = MemorySecretStore::new();
    let provider = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store);

    let first = provider.get_zync_options().unwrap();
    let second = provider.get_zync_options().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_stored_consistent_secret_is_used_verbatim() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = ZyncSecretFixture::consistent("s3cr3t").into_store();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.database_password, "s3cr3t");
    assert_eq!(options.database_url, database_url("s3cr3t"));
    assert_eq!(options.secret_key_base, "stored-secret-key-base");
    assert_eq!(options.authentication_token, "stored-authentication-token");
}

#[test]
fn test_mismatched_url_is_inconsistency() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = ZyncSecretFixture {
        database_url: Some(database_url("other")),
        ..ZyncSecretFixture::consistent("s3cr3t")
    }
    .into_store();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Inconsistency);
    assert!(err.to_string().starts_with("reading zync secret options: "));
}

#[test]
fn test_stored_password_with_missing_url_derives_url() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = ZyncSecretFixture {
        database_password: Some("s3cr3t".into()),
        ..Default::default()
    }
    .into_store();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.database_url, database_url("s3cr3t"));
}

#[test]
fn test_url_without_password_is_parse_error() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = ZyncSecretFixture {
        database_url: Some("postgresql://zync@zync-database:5432/zync_production".into()),
        ..ZyncSecretFixture::consistent("s3cr3t")
    }
    .into_store();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err.root_cause(), Error::MissingPassword { .. }));
}

#[test]
fn test_external_database_without_secret_is_not_found() {
    let apimanager = ApiManagerBuilder::new().external_zync_database(true).build();
    let store = MemorySecretStore::new();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(store.is_empty(), "nothing may be written on failure");
}

#[test]
fn test_external_database_without_url_field_is_not_found() {
    let apimanager = ApiManagerBuilder::new().external_zync_database(true).build();
    let store = ZyncSecretFixture {
        database_url: None,
        ..ZyncSecretFixture::consistent("s3cr3t")
    }
    .into_store();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_external_database_with_consistent_secret() {
    let apimanager = ApiManagerBuilder::new().external_zync_database(true).build();
    let store = ZyncSecretFixture::consistent("external").into_store();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.database_password, "external");
}

#[test]
fn test_plan_reports_generated_fields_without_writing() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = ZyncSecretFixture {
        database_password: Some("s3cr3t".into()),
        ..Default::default()
    }
    .into_store();

    let planned = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .plan_secret_writes()
        .unwrap();

    let writes: Vec<_> = planned
        .iter()
        .filter(|p| p.resolution.requires_write())
        .map(|p| p.field)
        .collect();
    assert_eq!(
        writes,
        vec!["SECRET_KEY_BASE", "ZYNC_AUTHENTICATION_TOKEN", "DATABASE_URL"]
    );
    assert_eq!(stored_field(&store, "SECRET_KEY_BASE"), None);
}

#[test]
fn test_resources_default_when_enabled() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(
        options.container_resource_requirements,
        default_zync_container_resource_requirements()
    );
    assert_eq!(
        options.que_container_resource_requirements,
        default_zync_que_container_resource_requirements()
    );
    assert_eq!(
        options.database_container_resource_requirements,
        default_zync_database_container_resource_requirements()
    );
}

#[test]
fn test_resources_empty_when_disabled() {
    let apimanager = ApiManagerBuilder::new()
        .resource_requirements_enabled(false)
        .build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert!(options.container_resource_requirements.is_empty());
    assert!(options.que_container_resource_requirements.is_empty());
    assert!(options.database_container_resource_requirements.is_empty());
}

#[test]
fn test_explicit_resources_win_even_when_disabled() {
    let custom = ResourceRequirements::default()
        .with_limit("cpu", "3")
        .with_request("cpu", "2");
    let apimanager = ApiManagerBuilder::new()
        .resource_requirements_enabled(false)
        .zync_que_resources(custom.clone())
        .build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.que_container_resource_requirements, custom);
    assert!(options.container_resource_requirements.is_empty());
}

#[test]
fn test_labels() {
    let apimanager = ApiManagerBuilder::new()
        .app_label("my-app")
        .zync_image("registry.example.com/zync:1.2.3")
        .build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.common_labels["app"], "my-app");
    assert_eq!(options.common_labels["threescale_component"], "zync");
    assert_eq!(options.common_zync_que_labels["threescale_component_element"], "zync-que");
    assert_eq!(options.common_zync_database_labels["threescale_component_element"], "database");

    let pod = &options.zync_pod_template_labels;
    assert_eq!(pod["deploymentConfig"], "zync");
    assert_eq!(pod["rht.comp_ver"], "1.2.3");
    assert_eq!(pod["rht.subcomp"], "zync");
    assert_eq!(pod["rht.subcomp_t"], "application");
    assert_eq!(pod["app"], "my-app");

    assert_eq!(options.zync_database_pod_template_labels["deploymentConfig"], "zync-database");
    assert_eq!(options.zync_database_pod_template_labels["rht.comp_ver"], "latest");
}

#[test]
fn test_labels_are_deterministic() {
    let apimanager = ApiManagerBuilder::new().build();
    let first = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &MemorySecretStore::new())
        .get_zync_options()
        .unwrap();
    let second = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &MemorySecretStore::new())
        .get_zync_options()
        .unwrap();

    assert_eq!(first.common_labels, second.common_labels);
    assert_eq!(first.zync_pod_template_labels, second.zync_pod_template_labels);
    assert_eq!(
        first.zync_database_pod_template_labels,
        second.zync_database_pod_template_labels
    );
}

#[test]
fn test_replicas_namespace_and_pull_secrets() {
    let apimanager = ApiManagerBuilder::new()
        .zync_replicas(0, 4)
        .image_pull_secrets(&["my-pull-secret"])
        .build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, "elsewhere", &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.zync_replicas, 0);
    assert_eq!(options.zync_que_replicas, 4);
    assert_eq!(options.namespace, "elsewhere");
    assert!(options.zync_metrics);
    let names: Vec<_> = options
        .zync_que_service_account_image_pull_secrets
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["my-pull-secret"]);
    assert_eq!(
        store.read("elsewhere", ZYNC_SECRET_NAME).unwrap().map(|d| d.len()),
        Some(4)
    );
}

#[test]
fn test_default_pull_secret() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(
        options.zync_que_service_account_image_pull_secrets[0].name,
        "threescale-registry-auth"
    );
}

#[test]
fn test_negative_replicas_fail_validation() {
    let apimanager = ApiManagerBuilder::new().zync_replicas(-1, 1).build();
    let store = MemorySecretStore::new();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().starts_with("validating zync options: "));
}

#[test]
fn test_invalid_image_is_reported() {
    let apimanager = ApiManagerBuilder::new().zync_image("Not A Valid Image").build();
    let store = MemorySecretStore::new();

    let err = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Image);
}

#[test]
fn test_invalid_apicast_image_does_not_affect_zync() {
    let apimanager = ApiManagerBuilder::new()
        .apicast_image("Registry.Example/APIcast:custom")
        .zync_image("quay.io/3scale/zync:custom")
        .build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();

    assert_eq!(options.zync_pod_template_labels["rht.comp_ver"], "custom");
}

#[test]
fn test_options_serialize_with_camel_case_names() {
    let apimanager = ApiManagerBuilder::new().build();
    let store = MemorySecretStore::new();

    let options = ZyncOptionsProvider::new(&apimanager, TEST_NAMESPACE, &store)
        .get_zync_options()
        .unwrap();
    let json = serde_json::to_value(&options).unwrap();

    assert_eq!(json["databasePassword"], options.database_password.as_str());
    assert_eq!(json["zyncQueReplicas"], 1);
    assert_eq!(json["commonLabels"]["threescale_component"], "zync");
    assert_eq!(json["containerResourceRequirements"]["limits"]["cpu"], "1");
    assert_eq!(json["zyncMetrics"], true);
}
