//! Zync alerting rules

use amp_options::component::zync::{ZYNC_COMPONENT, ZyncOptions};
use amp_options::labels::{self, LabelMap};
use amp_options::Validate;
use amp_spec::DEFAULT_APP_LABEL;

use crate::factory::{NAMESPACE_PLACEHOLDER, PLACEHOLDER, RuleFactory};
use crate::rule::{AlertRule, RuleBundle, Severity, minutes};

/// Que queue depth above which the queue is considered backed up.
const QUE_JOB_COUNT_THRESHOLD: u32 = 250;

/// 5XX responses per minute above which zync is considered unhealthy.
const SERVER_ERRORS_PER_MINUTE_THRESHOLD: u32 = 50;

pub struct ZyncRuleFactory;

pub fn new_zync_rule_factory() -> Box<dyn RuleFactory> {
    Box::new(ZyncRuleFactory)
}

impl RuleFactory for ZyncRuleFactory {
    fn subsystem(&self) -> &'static str {
        ZYNC_COMPONENT
    }

    fn rule_bundle(&self) -> RuleBundle {
        let options = synthetic_options();
        options
            .validate()
            .unwrap_or_else(|e| panic!("synthetic zync options are invalid: {e}"));
        zync_rule_bundle(&options)
    }
}

/// Options with just enough content to pass structural validation.
fn synthetic_options() -> ZyncOptions {
    ZyncOptions {
        image_tag: PLACEHOLDER.into(),
        database_image_tag: PLACEHOLDER.into(),
        authentication_token: PLACEHOLDER.into(),
        database_password: PLACEHOLDER.into(),
        secret_key_base: PLACEHOLDER.into(),
        database_url: PLACEHOLDER.into(),
        common_labels: labels::common_labels(DEFAULT_APP_LABEL, ZYNC_COMPONENT),
        common_zync_labels: LabelMap::new(),
        common_zync_que_labels: LabelMap::new(),
        common_zync_database_labels: LabelMap::new(),
        zync_pod_template_labels: LabelMap::new(),
        zync_que_pod_template_labels: LabelMap::new(),
        zync_database_pod_template_labels: LabelMap::new(),
        namespace: NAMESPACE_PLACEHOLDER.into(),
        ..Default::default()
    }
}

fn que_job_count_rule(alert: &str, job_type: &str, namespace: &str) -> AlertRule {
    AlertRule::new(
        alert,
        format!(
            "max(que_jobs_scheduled_total{{pod=~'zync-que.*',type='{job_type}',namespace='{namespace}'}}) by (namespace,job,exported_job) > {QUE_JOB_COUNT_THRESHOLD}"
        ),
        minutes(1),
        Severity::Warning,
    )
    .with_summary(&format!(
        "Job {{{{ $labels.job }}}} on {{{{ $labels.namespace }}}} has a high number of {job_type} jobs"
    ))
    .with_description(&format!(
        "Job {{{{ $labels.job }}}} on {{{{ $labels.namespace }}}} has more than {QUE_JOB_COUNT_THRESHOLD} {job_type} jobs"
    ))
}

/// Rule bundle for a resolved zync options record.
pub fn zync_rule_bundle(options: &ZyncOptions) -> RuleBundle {
    let ns = options.namespace.as_str();
    let rules = vec![
        AlertRule::new(
            "ThreescaleZyncJobDown",
            format!(r#"up{{job=~".*/zync",namespace="{ns}"}} == 0"#),
            minutes(1),
            Severity::Critical,
        )
        .with_summary("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN")
        .with_description("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN"),
        AlertRule::new(
            "ThreescaleZyncQueJobDown",
            format!(r#"up{{job=~".*/zync-que",namespace="{ns}"}} == 0"#),
            minutes(1),
            Severity::Critical,
        )
        .with_summary("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN")
        .with_description("Job {{ $labels.job }} on {{ $labels.namespace }} is DOWN"),
        que_job_count_rule("ThreescaleZyncQueScheduledJobCountHigh", "scheduled", ns),
        que_job_count_rule("ThreescaleZyncQueFailedJobCountHigh", "failed", ns),
        que_job_count_rule("ThreescaleZyncQueReadyJobCountHigh", "ready", ns),
        AlertRule::new(
            "ThreescaleZync5XXRequestsHigh",
            format!(
                r#"sum(increase(rails_requests_total{{namespace="{ns}",pod=~"zync-[a-z]+-.*",status=~"5[0-9]*"}}[1m])) by (namespace,job) > {SERVER_ERRORS_PER_MINUTE_THRESHOLD}"#
            ),
            minutes(1),
            Severity::Warning,
        )
        .with_summary("Job {{ $labels.job }} on {{ $labels.namespace }} has more than 50 HTTP 5xx requests in the last minute")
        .with_description("Job {{ $labels.job }} on {{ $labels.namespace }} has more than 50 HTTP 5xx requests in the last minute"),
    ];

    RuleBundle::new(ZYNC_COMPONENT, ns, crate::bundle_labels(&options.common_labels), rules)
}
