//! Declarative secret-field tables
//!
//! Each subsystem lists the options fields it reads from secrets as rows of
//! a table. A row names the secret and field the value lives in, how to
//! generate a default, and when the field is required instead (no default).
//! Rows are resolved in order, so a row's default generator may read values
//! resolved by earlier rows.

use amp_secrets::{FieldPolicy, Resolution, SecretSource};
use amp_spec::ApiManager;

use crate::Result;

/// One secret-backed options field.
pub struct SecretField<O> {
    /// Options field name, for logs and plans
    pub option: &'static str,
    pub secret: &'static str,
    pub field: &'static str,
    /// Default generator; sees the options resolved by earlier rows
    pub default: fn(&O) -> String,
    /// When true the field must already exist and no default is generated
    pub required_if: fn(&ApiManager) -> bool,
    pub assign: fn(&mut O, String),
}

impl<O> SecretField<O> {
    /// Policy for this row given the spec and the options resolved so far.
    pub fn policy(&self, apimanager: &ApiManager, resolved: &O) -> FieldPolicy {
        if (self.required_if)(apimanager) {
            FieldPolicy::required(self.secret, self.field)
        } else {
            FieldPolicy::defaultable(self.secret, self.field, (self.default)(resolved))
        }
    }
}

/// Predicate for rows that always accept a generated default.
pub fn never(_: &ApiManager) -> bool {
    false
}

/// Outcome of planning one row without writing to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    pub option: &'static str,
    pub secret: &'static str,
    pub field: &'static str,
    pub resolution: Resolution,
}

/// Resolve every row into `options`, persisting generated defaults.
pub fn resolve_secret_fields<O>(
    table: &[SecretField<O>],
    apimanager: &ApiManager,
    source: &SecretSource<'_>,
    options: &mut O,
) -> Result<()> {
    for row in table {
        let policy = row.policy(apimanager, options);
        let value = source.apply(&policy)?;
        tracing::debug!(option = row.option, secret = row.secret, field = row.field, "Resolved secret field");
        (row.assign)(options, value);
    }
    Ok(())
}

/// Decide every row without writing anything to the store.
///
/// Rows are decided against a scratch options value so derived defaults see
/// the same inputs they would during [`resolve_secret_fields`].
pub fn plan_secret_fields<O: Default>(
    table: &[SecretField<O>],
    apimanager: &ApiManager,
    source: &SecretSource<'_>,
) -> Result<Vec<PlannedField>> {
    let mut scratch = O::default();
    let mut planned = Vec::with_capacity(table.len());
    for row in table {
        let policy = row.policy(apimanager, &scratch);
        let resolution = source.plan(&policy)?;
        (row.assign)(&mut scratch, resolution.value().to_string());
        planned.push(PlannedField {
            option: row.option,
            secret: row.secret,
            field: row.field,
            resolution,
        });
    }
    Ok(planned)
}
