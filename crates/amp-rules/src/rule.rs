//! Alerting-rule model

use std::time::Duration;

use amp_options::LabelMap;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

/// One alerting rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRule {
    pub alert: String,
    pub expr: String,
    /// Minimum time the condition must hold before the alert fires
    #[serde(rename = "for", serialize_with = "serialize_duration")]
    pub for_duration: Duration,
    pub severity: Severity,
    /// Message template; may reference `{{ $labels.* }}`
    pub summary: String,
    pub description: String,
}

impl AlertRule {
    pub fn new(alert: &str, expr: String, for_duration: Duration, severity: Severity) -> Self {
        Self {
            alert: alert.to_string(),
            expr,
            for_duration,
            severity,
            summary: String::new(),
            description: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Ordered rule set of one subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleBundle {
    pub name: String,
    pub subsystem: String,
    /// Rule group name, `<namespace>/<subsystem>.rules`
    pub group: String,
    pub labels: LabelMap,
    pub rules: Vec<AlertRule>,
}

impl RuleBundle {
    pub fn new(subsystem: &str, namespace: &str, labels: LabelMap, rules: Vec<AlertRule>) -> Self {
        Self {
            name: subsystem.to_string(),
            subsystem: subsystem.to_string(),
            group: format!("{namespace}/{subsystem}.rules"),
            labels,
            rules,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| Error::Yaml {
            bundle: self.name.clone(),
            source,
        })
    }

    /// `sha256:<hex>` of the YAML encoding.
    pub fn checksum(&self) -> Result<String> {
        let yaml = self.to_yaml()?;
        Ok(format!("sha256:{:x}", Sha256::digest(yaml.as_bytes())))
    }
}

/// Prometheus duration literal: `90s`, `5m`, `1h`.
pub fn prometheus_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs > 0 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs > 0 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&prometheus_duration(*duration))
}

/// Shorthand for whole minutes.
pub(crate) const fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}
