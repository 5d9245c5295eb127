//! Cross-field consistency checks between independently stored secret values
//!
//! A database connection URL and the database password are stored as two
//! separate fields of the same secret. Both must carry the same credential;
//! if one is rotated without the other the deployment would fail to connect,
//! so resolution refuses to continue.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{Error, Result};

/// Names of the two secret fields being compared, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct UrlPasswordFields<'a> {
    pub secret: &'a str,
    pub url_field: &'a str,
    pub password_field: &'a str,
}

/// Verify that `database_url` embeds exactly `password` in its user-info.
///
/// A URL without user-info and a URL whose user-info has no password part are
/// reported the same way, as [`Error::MissingPassword`].
pub fn validate_url_password(
    fields: UrlPasswordFields<'_>,
    database_url: &str,
    password: &str,
) -> Result<()> {
    let parsed = Url::parse(database_url).map_err(|e| Error::Parse {
        secret: fields.secret.to_string(),
        field: fields.url_field.to_string(),
        message: e.to_string(),
    })?;

    let missing_password = || Error::MissingPassword {
        secret: fields.secret.to_string(),
        field: fields.url_field.to_string(),
    };

    let encoded = parsed.password().ok_or_else(missing_password)?;
    let embedded = percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|e| Error::Parse {
            secret: fields.secret.to_string(),
            field: fields.url_field.to_string(),
            message: e.to_string(),
        })?;

    if embedded.as_bytes() != password.as_bytes() {
        tracing::warn!(
            secret = fields.secret,
            url_field = fields.url_field,
            password_field = fields.password_field,
            "Password embedded in connection URL differs from stored password"
        );
        return Err(Error::Inconsistency {
            secret: fields.secret.to_string(),
            password_field: fields.password_field.to_string(),
            url_field: fields.url_field.to_string(),
        });
    }

    Ok(())
}
