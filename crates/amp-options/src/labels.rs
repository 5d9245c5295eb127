//! Label maps and layered composition
//!
//! Pod-template labels are built from three layers, later layers
//! overwriting earlier ones key by key:
//!
//! 1. metering labels computed from the component name and image version
//! 2. the tier's common labels
//! 3. the `deploymentConfig` identifier of the pod template

use std::collections::BTreeMap;
use std::fmt;

/// Ordered label map; ordering keeps serialized output byte-stable.
pub type LabelMap = BTreeMap<String, String>;

/// Key of the label identifying the owning application.
pub const APP_LABEL_KEY: &str = "app";
/// Key of the label naming the subsystem.
pub const COMPONENT_LABEL_KEY: &str = "threescale_component";
/// Key of the label naming the tier within a subsystem.
pub const COMPONENT_ELEMENT_LABEL_KEY: &str = "threescale_component_element";
/// Key of the label naming the pod template.
pub const DEPLOYMENT_CONFIG_LABEL_KEY: &str = "deploymentConfig";

/// Metering classification of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Application,
    Infrastructure,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::Application => write!(f, "application"),
            ComponentType::Infrastructure => write!(f, "infrastructure"),
        }
    }
}

/// Merge label layers in order; a later layer's key always wins.
pub fn compose<'a, I>(layers: I) -> LabelMap
where
    I: IntoIterator<Item = &'a LabelMap>,
{
    let mut labels = LabelMap::new();
    for layer in layers {
        for (k, v) in layer {
            labels.insert(k.clone(), v.clone());
        }
    }
    labels
}

/// Labels shared by every object of one subsystem.
pub fn common_labels(app_label: &str, component: &str) -> LabelMap {
    LabelMap::from([
        (APP_LABEL_KEY.to_string(), app_label.to_string()),
        (COMPONENT_LABEL_KEY.to_string(), component.to_string()),
    ])
}

/// `common` plus the tier element label.
pub fn tier_labels(common: &LabelMap, element: &str) -> LabelMap {
    let mut labels = common.clone();
    labels.insert(COMPONENT_ELEMENT_LABEL_KEY.to_string(), element.to_string());
    labels
}

/// Metering labels for a component at a given version.
pub fn metering_labels(component: &str, version: &str, component_type: ComponentType) -> LabelMap {
    LabelMap::from([
        ("com.company".to_string(), "Red_Hat".to_string()),
        ("rht.prod_name".to_string(), "Red_Hat_Integration".to_string()),
        ("rht.prod_ver".to_string(), crate::product::PRODUCT_VERSION.to_string()),
        ("rht.comp".to_string(), "3scale".to_string()),
        ("rht.comp_ver".to_string(), version.to_string()),
        ("rht.subcomp".to_string(), component.to_string()),
        ("rht.subcomp_t".to_string(), component_type.to_string()),
    ])
}

/// Pod-template labels: metering, then tier labels, then `deploymentConfig`.
pub fn pod_template_labels(
    deployment: &str,
    version: &str,
    component_type: ComponentType,
    tier: &LabelMap,
) -> LabelMap {
    let metering = metering_labels(deployment, version, component_type);
    let template = LabelMap::from([(
        DEPLOYMENT_CONFIG_LABEL_KEY.to_string(),
        deployment.to_string(),
    )]);
    compose([&metering, tier, &template])
}
