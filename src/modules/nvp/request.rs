use std::fmt;

use crate::core::{Error, Result};

/// Fields whose values must never reach a log line
const SECRET_FIELDS: [&str; 2] = ["PWD", "SIGNATURE"];

/// An ordered list of NVP request parameters
///
/// Setting a key that is already present replaces its value in place, so the
/// encoded body never carries duplicate names.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NvpRequest {
    params: Vec<(String, String)>,
}

impl NvpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();

        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.params.push((key, value)),
        }

        self
    }

    /// Set a parameter only when a non-empty value is present
    pub fn push_opt<V: AsRef<str>>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.push(key, value);
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The remote operation this request invokes
    pub fn method(&self) -> Option<&str> {
        self.get("METHOD")
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> Result<String> {
        serde_urlencoded::to_string(&self.params)
            .map_err(|e| Error::validation(format!("Failed to encode NVP request: {}", e)))
    }

    /// Encoded body with credentials masked, for logging
    pub fn redacted(&self) -> String {
        let masked: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| {
                if SECRET_FIELDS.contains(&k.as_str()) {
                    (k.as_str(), "xxxx")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        serde_urlencoded::to_string(masked).unwrap_or_default()
    }
}

impl fmt::Debug for NvpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NvpRequest").field(&self.redacted()).finish()
    }
}
