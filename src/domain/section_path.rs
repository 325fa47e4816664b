// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted section path newtype.
//!
//! This module provides the `SectionPath` type, a newtype wrapper around `String`
//! for paths such as `openssl_conf.providers` that are walked one section
//! indirection per component.

use std::fmt;

/// A dotted path through nested sections.
///
/// Components are separated by `.`. Empty components (for example from
/// `a..b`) are kept as empty strings; they simply never match a key.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::SectionPath;
///
/// let path = SectionPath::from("openssl_conf.providers");
/// let components: Vec<&str> = path.components().collect();
/// assert_eq!(components, vec!["openssl_conf", "providers"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SectionPath(String);

impl SectionPath {
    /// Path of the section listing configured providers.
    pub const PROVIDERS: &'static str = "openssl_conf.providers";

    /// Path of the section listing configured engines.
    pub const ENGINES: &'static str = "openssl_conf.engines";

    /// Creates a new `SectionPath` from a `String`.
    pub fn new(path: String) -> Self {
        SectionPath(path)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path components in order.
    pub fn components(&self) -> std::str::Split<'_, char> {
        self.0.split('.')
    }
}

impl From<String> for SectionPath {
    fn from(s: String) -> Self {
        SectionPath(s)
    }
}

impl From<&str> for SectionPath {
    fn from(s: &str) -> Self {
        SectionPath(s.to_string())
    }
}

impl AsRef<str> for SectionPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
