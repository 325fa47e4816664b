// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable adapter.
//!
//! This module provides an adapter that reads variables from the process
//! environment, or from a fixed set of values supplied up front.

use crate::ports::Environment;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment adapter backed by the process environment.
///
/// Variables are read on every lookup; nothing is cached, so the adapter sees
/// the environment as it is when the configuration is loaded.
///
/// # Examples
///
/// ```rust
/// use osslcfg::adapters::EnvVarAdapter;
/// use osslcfg::ports::Environment;
/// use std::collections::HashMap;
///
/// // Read the real environment
/// let adapter = EnvVarAdapter::new();
///
/// // Or use fixed values
/// let mut values = HashMap::new();
/// values.insert("OPENSSL_CONF".to_string(), "/tmp/openssl.cnf".to_string());
/// let adapter = EnvVarAdapter::with_values(values);
/// assert_eq!(adapter.var("OPENSSL_CONF").as_deref(), Some("/tmp/openssl.cnf"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Fixed values that replace the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter that reads the process environment.
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an adapter with pre-populated values.
    ///
    /// **Note**: This method is primarily intended for testing. Variables not in
    /// `values` are reported as unset, whatever the process environment says.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Adds or replaces a single value, switching to fixed values if needed.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

impl Environment for EnvVarAdapter {
    fn var(&self, name: &str) -> Option<String> {
        if let Some(values) = &self.values {
            return values.get(name).cloned();
        }

        match env::var(name) {
            Ok(value) if value.len() > MAX_ENV_VALUE_LEN => {
                tracing::debug!(
                    "Ignoring oversized environment variable {}: {} bytes (max {})",
                    name,
                    value.len(),
                    MAX_ENV_VALUE_LEN
                );
                None
            }
            Ok(value) => Some(value),
            Err(env::VarError::NotUnicode(_)) => {
                tracing::debug!("Ignoring non-UTF-8 environment variable {}", name);
                None
            }
            Err(env::VarError::NotPresent) => None,
        }
    }
}
