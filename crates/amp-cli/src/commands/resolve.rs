//! The resolve command

use std::path::{Path, PathBuf};

use amp_fs::ConfigStore;
use amp_options::{ApicastOptions, ApicastOptionsProvider, ZyncOptions, ZyncOptionsProvider};
use amp_secrets::FileSecretStore;
use amp_spec::ApiManager;
use colored::Colorize;
use serde::Serialize;

use super::render;
use crate::cli::{Component, OutputFormat};
use crate::error::{CliError, Result};

/// Secrets file location under the user's config directory.
const DEFAULT_SECRETS_FILE: &str = "amp-operator/secrets.json";

#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub spec: PathBuf,
    pub component: Component,
    pub namespace: Option<String>,
    pub secrets: Option<PathBuf>,
    pub format: OutputFormat,
    pub plan: bool,
}

#[derive(Debug, Default, Serialize)]
struct ResolvedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    zync: Option<ZyncOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apicast: Option<ApicastOptions>,
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let apimanager: ApiManager = ConfigStore::new().load(&args.spec)?;
    let namespace = target_namespace(&apimanager, args.namespace.as_deref())?;
    let store = FileSecretStore::new(secrets_file(args.secrets.as_deref())?);
    tracing::debug!(
        spec = %args.spec.display(),
        namespace = %namespace,
        secrets = %store.path().display(),
        "Resolving options"
    );

    if args.plan {
        return print_plan(&apimanager, &namespace, &store, args.component);
    }

    let mut resolved = ResolvedOptions::default();
    if args.component.includes_zync() {
        resolved.zync =
            Some(ZyncOptionsProvider::new(&apimanager, &namespace, &store).get_zync_options()?);
    }
    if args.component.includes_apicast() {
        resolved.apicast =
            Some(ApicastOptionsProvider::new(&apimanager, &namespace).get_apicast_options()?);
    }

    println!("{}", render(&resolved, args.format)?);
    Ok(())
}

fn print_plan(
    apimanager: &ApiManager,
    namespace: &str,
    store: &FileSecretStore,
    component: Component,
) -> Result<()> {
    if !component.includes_zync() {
        println!("{} apicast reads no secrets", "ok".green().bold());
        return Ok(());
    }

    let planned = ZyncOptionsProvider::new(apimanager, namespace, store).plan_secret_writes()?;
    println!("{} {}/{}", "Secret fields".bold(), namespace, "zync".cyan());
    for field in &planned {
        let action = if field.resolution.requires_write() {
            "generate".yellow()
        } else {
            "stored".green()
        };
        println!("  {:<28} {}", field.field, action);
    }
    Ok(())
}

/// `--namespace` wins over the document's metadata.
fn target_namespace(apimanager: &ApiManager, flag: Option<&str>) -> Result<String> {
    flag.or_else(|| apimanager.namespace())
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::user("no target namespace: set metadata.namespace or pass --namespace")
        })
}

fn secrets_file(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join(DEFAULT_SECRETS_FILE))
        .ok_or_else(|| CliError::user("cannot locate a config directory: pass --secrets"))
}
