//! File-backed secret store
//!
//! Secrets are kept in a single JSON document shaped as
//! `{ "<namespace>": { "<secret>": { "<field>": "<value>" } } }`.
//! Every write rewrites the document atomically with owner-only permissions.
//! Writers serialize on an advisory lock held on `<file>.lock`, so stores
//! opened on the same path (in this process or another) never drop each
//! other's fields.

use crate::{Result, SecretData, SecretStore};
use amp_fs::{ConfigStore, FileLock};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, BTreeMap<String, SecretData>>;

/// Secret store persisted to a JSON file.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    lock_path: PathBuf,
    config: ConfigStore,
}

impl FileSecretStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().map(OsString::from).unwrap_or_default();
        lock_name.push(".lock");
        Self {
            lock_path: path.with_file_name(lock_name),
            path,
            config: ConfigStore::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file writers lock while they load, modify and save.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn load(&self) -> Result<Document> {
        if !self.path.is_file() {
            return Ok(Document::new());
        }
        Ok(self.config.load(&self.path)?)
    }
}

impl SecretStore for FileSecretStore {
    fn read(&self, namespace: &str, secret: &str) -> Result<Option<SecretData>> {
        let mut document = self.load()?;
        Ok(document
            .get_mut(namespace)
            .and_then(|secrets| secrets.remove(secret)))
    }

    fn write_field(&self, namespace: &str, secret: &str, field: &str, value: &str) -> Result<()> {
        let lock = FileLock::exclusive(&self.lock_path)?;

        let mut document = self.load()?;
        document
            .entry(namespace.to_string())
            .or_default()
            .entry(secret.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());

        tracing::debug!(
            path = %self.path.display(),
            lock = %lock.path().display(),
            namespace,
            secret,
            field,
            "Writing secret field"
        );
        self.config.save_private(&self.path, &document)?;
        Ok(())
    }
}
