//! Screen navigation contracts.
//!
//! Parameters travel between screens as a string-only map; any
//! non-string value is serialized first (booleans as `"true"`/`"false"`,
//! structured values as JSON text).

pub mod routes;

pub use routes::{is_exempt_route, Screen, EXEMPT_ROUTES};

use client_core::ClientError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;

/// Transitions the visible screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: Screen, params: NavParams, reset_stack: bool);
}

/// Reports the path of the screen currently shown.
pub trait RouteSource: Send + Sync {
    fn current_path(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams(BTreeMap<String, String>);

impl NavParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn insert_bool(&mut self, key: &str, value: bool) {
        self.insert(key, if value { "true" } else { "false" });
    }

    pub fn insert_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), ClientError> {
        let text = serde_json::to_string(value)?;
        self.insert(key, text);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Missing keys read as `false`; anything other than `"true"`/`"false"` is rejected.
    pub fn get_bool(&self, key: &str) -> Result<bool, ClientError> {
        match self.get(key) {
            None | Some("false") => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(ClientError::BadRequest(anyhow::anyhow!(
                "Parameter '{}' is not a boolean: {}",
                key,
                other
            ))),
        }
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        self.get(key)
            .map(|text| serde_json::from_str(text).map_err(ClientError::from))
            .transpose()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for NavParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }
}
