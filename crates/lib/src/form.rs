//! `application/x-www-form-urlencoded` request bodies.

use crate::errors::AnalyticsError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encodes ordered `key=value` pairs joined by `&`.
///
/// Keys and values are percent-encoded, so a value containing `&`, `=`,
/// spaces or non-ASCII text decodes back to exactly what was passed in.
pub fn encode_form(pairs: &[(&str, &str)]) -> Result<String, AnalyticsError> {
    Ok(serde_urlencoded::to_string(pairs)?)
}
