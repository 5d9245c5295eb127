//! Rule bundles built through the registry

use amp_rules::{NAMESPACE_PLACEHOLDER, RuleFactoryRegistry};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("zync", 6)]
#[case("apicast", 5)]
fn test_bundle_is_deterministic(#[case] subsystem: &str, #[case] rule_count: usize) {
    let registry = RuleFactoryRegistry::with_builtins();

    let first = registry.bundle(subsystem).unwrap();
    let second = registry.bundle(subsystem).unwrap();

    assert_eq!(first.subsystem, subsystem);
    assert_eq!(first.rules.len(), rule_count);
    assert_eq!(first, second);
    assert_eq!(first.checksum().unwrap(), second.checksum().unwrap());
}

#[test]
fn test_all_bundles_use_namespace_placeholder() {
    for bundle in RuleFactoryRegistry::with_builtins().bundles() {
        assert_eq!(bundle.group, format!("{NAMESPACE_PLACEHOLDER}/{}.rules", bundle.subsystem));
        assert!(!bundle.rules.is_empty());
    }
}

#[test]
fn test_bundles_serialize_to_json() {
    let bundles = RuleFactoryRegistry::with_builtins().bundles();
    let json = serde_json::to_value(&bundles).unwrap();

    assert_eq!(json[0]["name"], "zync");
    assert_eq!(json[0]["rules"][0]["for"], "1m");
    assert_eq!(json[1]["rules"][0]["severity"], "critical");
}
