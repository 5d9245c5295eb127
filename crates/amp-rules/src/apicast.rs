//! APIcast alerting rules

use amp_options::Validate;
use amp_options::component::apicast::{APICAST_COMPONENT, ApicastOptions};
use amp_options::labels::{self, LabelMap};
use amp_spec::DEFAULT_APP_LABEL;

use crate::factory::{NAMESPACE_PLACEHOLDER, PLACEHOLDER, RuleFactory};
use crate::rule::{AlertRule, RuleBundle, Severity, minutes};

pub struct ApicastRuleFactory;

pub fn new_apicast_rule_factory() -> Box<dyn RuleFactory> {
    Box::new(ApicastRuleFactory)
}

impl RuleFactory for ApicastRuleFactory {
    fn subsystem(&self) -> &'static str {
        APICAST_COMPONENT
    }

    fn rule_bundle(&self) -> RuleBundle {
        let options = synthetic_options();
        options
            .validate()
            .unwrap_or_else(|e| panic!("synthetic apicast options are invalid: {e}"));
        apicast_rule_bundle(&options)
    }
}

fn synthetic_options() -> ApicastOptions {
    ApicastOptions {
        image_tag: PLACEHOLDER.into(),
        management_api: PLACEHOLDER.into(),
        openssl_verify: PLACEHOLDER.into(),
        response_codes: PLACEHOLDER.into(),
        common_labels: labels::common_labels(DEFAULT_APP_LABEL, APICAST_COMPONENT),
        common_staging_labels: LabelMap::new(),
        common_production_labels: LabelMap::new(),
        staging_pod_template_labels: LabelMap::new(),
        production_pod_template_labels: LabelMap::new(),
        namespace: NAMESPACE_PLACEHOLDER.into(),
        ..Default::default()
    }
}

/// Rule bundle for a resolved APIcast options record.
pub fn apicast_rule_bundle(options: &ApicastOptions) -> RuleBundle {
    let ns = options.namespace.as_str();
    let rules = vec![
        AlertRule::new(
            "ThreescaleApicastJobDown",
            format!(r#"up{{job=~".*/apicast-production|.*/apicast-staging",namespace="{ns}"}} == 0"#),
            minutes(1),
            Severity::Critical,
        )
        .with_summary("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN")
        .with_description("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN"),
        AlertRule::new(
            "ThreescaleApicastRequestTime",
            format!(
                "sum(rate(total_response_time_seconds_bucket{{namespace='{ns}', pod=~'apicast-production.*'}}[1m])) by (pod) - sum(rate(total_response_time_seconds_bucket{{namespace='{ns}', pod=~'apicast-production.*', le='1'}}[1m])) by (pod) > 1"
            ),
            minutes(5),
            Severity::Warning,
        )
        .with_summary("Request on instance {{ $labels.instance }} is taking more than one second to process the requests")
        .with_description("High number of request taking more than a second to be processed"),
        AlertRule::new(
            "ThreescaleApicastHttp4xxErrorRate",
            format!(
                r#"sum(rate(apicast_status{{namespace='{ns}', status=~"^4.."}}[1m])) / sum(rate(apicast_status{{namespace='{ns}'}}[1m])) * 100 > 5"#
            ),
            minutes(5),
            Severity::Warning,
        )
        .with_summary("APICast high HTTP 4XX error rate (instance {{ $labels.instance }})")
        .with_description("The number of request with 4XX is bigger than the 5% of total request."),
        AlertRule::new(
            "ThreescaleApicastLatencyHigh",
            format!(
                "histogram_quantile(0.99, sum(rate(total_response_time_seconds_bucket{{namespace='{ns}',}}[30m])) by (le)) > 5"
            ),
            minutes(5),
            Severity::Warning,
        )
        .with_summary("APICast latency high (instance {{ $labels.instance }})")
        .with_description("APIcast p99 latency is higher than 5 seconds\n  VALUE = {{ $value }}\n  LABELS: {{ $labels }}"),
        AlertRule::new(
            "ThreescaleApicastWorkerRestart",
            format!("changes(worker_process{{namespace='{ns}', pod=~'apicast-production.*'}}[5m]) > 0"),
            minutes(5),
            Severity::Warning,
        )
        .with_summary("A new worker process in Nginx has been started")
        .with_description("A new thread has been started. This could indicate that a worker process has died due to the memory limits being exceeded. Please investigate the memory pressure on pod (instance {{ $labels.instance }})"),
    ];

    RuleBundle::new(APICAST_COMPONENT, ns, crate::bundle_labels(&options.common_labels), rules)
}
