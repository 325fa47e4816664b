// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single `name = value` assignment.
//!
//! This module provides the `ConfigValue` type, the unit that sections are made
//! of. Values are stored fully expanded: quoting, escapes and variable references
//! have already been resolved by the parser.

use std::fmt;

/// A named configuration value inside a section.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::new("providers", "provider_sect");
/// assert_eq!(value.name(), "providers");
/// assert_eq!(value.value(), "provider_sect");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigValue {
    name: String,
    value: String,
}

impl ConfigValue {
    /// Creates a new `ConfigValue`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the name of the assignment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expanded value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits the pair into its owned name and value.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for ConfigValue {
    fn from((name, value): (N, V)) -> Self {
        ConfigValue::new(name, value)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
