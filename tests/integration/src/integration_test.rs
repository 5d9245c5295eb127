//! End-to-end integration tests across the workspace
//!
//! Exercises the complete flow: spec file loading -> options resolution
//! against a file-backed secret store -> rule bundles from the registry.

use amp_fs::ConfigStore;
use amp_options::{ApicastOptionsProvider, ErrorKind, ZyncOptionsProvider};
use amp_rules::RuleFactoryRegistry;
use amp_secrets::{FileSecretStore, SecretStore};
use amp_spec::ApiManager;
use amp_test_utils::database_url;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn write_spec(dir: &Path, external_database: bool) -> std::path::PathBuf {
    let path = dir.join("apimanager.toml");
    fs::write(
        &path,
        format!(
            r#"
[metadata]
name = "example"
namespace = "3scale"

[spec]
appLabel = "api-management"

[spec.zync.queSpec]
replicas = 2

[spec.externalComponents.zync]
database = {external_database}
"#
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_resolve_from_files() {
    let temp = TempDir::new().unwrap();
    let apimanager: ApiManager = ConfigStore::new()
        .load(&write_spec(temp.path(), false))
        .unwrap();
    let store = FileSecretStore::new(temp.path().join("secrets.json"));
    let namespace = apimanager.namespace().unwrap().to_string();

    let zync = ZyncOptionsProvider::new(&apimanager, &namespace, &store)
        .get_zync_options()
        .unwrap();
    let apicast = ApicastOptionsProvider::new(&apimanager, &namespace)
        .get_apicast_options()
        .unwrap();

    assert_eq!(zync.zync_que_replicas, 2);
    assert_eq!(zync.database_url, database_url(&zync.database_password));
    assert_eq!(zync.common_labels["app"], "api-management");
    assert_eq!(apicast.common_labels["app"], "api-management");

    // A fresh store over the same file sees the persisted values
    let reopened = FileSecretStore::new(temp.path().join("secrets.json"));
    let again = ZyncOptionsProvider::new(&apimanager, &namespace, &reopened)
        .get_zync_options()
        .unwrap();
    assert_eq!(again, zync);
}

#[test]
fn test_external_database_requires_existing_secret() {
    let temp = TempDir::new().unwrap();
    let apimanager: ApiManager = ConfigStore::new()
        .load(&write_spec(temp.path(), true))
        .unwrap();
    let store = FileSecretStore::new(temp.path().join("secrets.json"));

    let err = ZyncOptionsProvider::new(&apimanager, "3scale", &store)
        .get_zync_options()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!store.path().exists());

    for (field, value) in [
        ("ZYNC_DATABASE_PASSWORD", "external".to_string()),
        ("DATABASE_URL", database_url("external")),
    ] {
        store.write_field("3scale", "zync", field, &value).unwrap();
    }

    let options = ZyncOptionsProvider::new(&apimanager, "3scale", &store)
        .get_zync_options()
        .unwrap();
    assert_eq!(options.database_password, "external");
}

#[test]
fn test_rotated_password_is_detected() {
    let temp = TempDir::new().unwrap();
    let apimanager: ApiManager = ConfigStore::new()
        .load(&write_spec(temp.path(), false))
        .unwrap();
    let store = FileSecretStore::new(temp.path().join("secrets.json"));

    ZyncOptionsProvider::new(&apimanager, "3scale", &store)
        .get_zync_options()
        .unwrap();
    store
        .write_field("3scale", "zync", "ZYNC_DATABASE_PASSWORD", "rotated")
        .unwrap();

    let err = ZyncOptionsProvider::new(&apimanager, "3scale", &store)
        .get_zync_options()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inconsistency);
}

#[test]
fn test_subsystems_resolve_concurrently() {
    let temp = TempDir::new().unwrap();
    let apimanager = Arc::new(
        ConfigStore::new()
            .load::<ApiManager>(&write_spec(temp.path(), false))
            .unwrap(),
    );
    let store = Arc::new(FileSecretStore::new(temp.path().join("secrets.json")));

    let zync = {
        let apimanager = Arc::clone(&apimanager);
        let store = Arc::clone(&store);
        thread::spawn(move || {
            ZyncOptionsProvider::new(&apimanager, "3scale", store.as_ref())
                .get_zync_options()
                .map(|o| o.database_password)
        })
    };
    let apicast = {
        let apimanager = Arc::clone(&apimanager);
        thread::spawn(move || {
            ApicastOptionsProvider::new(&apimanager, "3scale")
                .get_apicast_options()
                .map(|o| o.namespace)
        })
    };

    let password = zync.join().expect("zync thread panicked").unwrap();
    let namespace = apicast.join().expect("apicast thread panicked").unwrap();

    assert_eq!(namespace, "3scale");
    let data = store.read("3scale", "zync").unwrap().unwrap();
    assert_eq!(data["ZYNC_DATABASE_PASSWORD"], password);
}

#[test]
fn test_rules_need_no_secret_store() {
    let registry = RuleFactoryRegistry::with_builtins();

    let bundles = registry.bundles();
    assert_eq!(bundles.len(), 2);
    for bundle in &bundles {
        assert!(!bundle.rules.is_empty());
        assert_eq!(
            bundle.checksum().unwrap(),
            registry.bundle(&bundle.subsystem).unwrap().checksum().unwrap()
        );
    }
}
