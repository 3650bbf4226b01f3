//! Form-encoded request bodies.
//!
//! # Responsibilities
//! - Read the request body up to the configured limit
//! - URL-decode it into key/value pairs
//! - Offer lenient typed getters for per-resource decoders
//!
//! # Design Decisions
//! - First value wins for repeated keys
//! - A value that fails to convert is treated as absent, never as an error

use std::collections::HashMap;
use std::str::FromStr;

use axum::body::Body;
use url::form_urlencoded;

use crate::domain::Validate;

/// Failure reading or decoding a form body.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("reading request body: {0}")]
    Body(#[from] axum::Error),

    #[error("request body is not UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Decoded `application/x-www-form-urlencoded` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    pub fn parse(raw: &str) -> Self {
        let mut values = HashMap::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            values.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for `key`, or an empty string when absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key).to_string()
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).trim().parse().ok()
    }

    pub fn get_u32(&self, key: &str) -> u32 {
        self.parsed(key).unwrap_or_default()
    }

    pub fn get_u64(&self, key: &str) -> u64 {
        self.parsed(key).unwrap_or_default()
    }

    pub fn get_optional_u64(&self, key: &str) -> Option<u64> {
        self.parsed(key)
    }

    pub fn get_optional_u16(&self, key: &str) -> Option<u16> {
        self.parsed(key)
    }

    pub fn get_f32(&self, key: &str) -> f32 {
        self.parsed(key).unwrap_or_default()
    }

    /// Checkbox semantics: `1`, `t`, `true` and `on` are true, anything else false.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.get(key).trim().to_ascii_lowercase().as_str(),
            "1" | "t" | "true" | "on"
        )
    }
}

/// Read and decode a form body of at most `limit` bytes.
pub async fn extract_form(body: Body, limit: usize) -> Result<FormValues, FormError> {
    let bytes = axum::body::to_bytes(body, limit).await?;
    let raw = std::str::from_utf8(&bytes)?;
    Ok(FormValues::parse(raw))
}

/// Build a command from a decoded form, keeping it only if it validates.
pub fn decode_command<T, F>(kind: &str, form: Result<FormValues, FormError>, build: F) -> Option<T>
where
    T: Validate + std::fmt::Debug,
    F: FnOnce(&FormValues) -> T,
{
    let form = match form {
        Ok(form) => form,
        Err(err) => {
            tracing::debug!(kind, error = %err, "Failed to decode form");
            return None;
        }
    };

    let command = build(&form);
    match command.validate() {
        Ok(()) => Some(command),
        Err(err) => {
            tracing::debug!(kind, error = %err, "Rejecting invalid form input");
            None
        }
    }
}
