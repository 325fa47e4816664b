// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parsed configuration document.

use crate::domain::{resolver, Section, SectionPath};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A complete configuration document: sections in the order they were defined.
///
/// Includes are already merged into one flat namespace and every value is fully
/// expanded. A `Config` is built once by a parser and only read afterwards.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::Config;
///
/// let mut config = Config::new();
/// config.section_mut(Config::DEFAULT_SECTION).push("openssl_conf", "init");
/// config.section_mut("init").push("providers", "provider_sect");
///
/// assert_eq!(config.get_string("init", "providers"), Some("provider_sect"));
/// assert!(config.section("provider_sect").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
    source: Option<PathBuf>,
}

impl Config {
    /// Name of the section holding top-level keys.
    pub const DEFAULT_SECTION: &'static str = "default";

    /// Creates an empty document with no sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the file the document was loaded from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Returns the file the document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the section called `name`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&idx| &self.sections[idx])
    }

    /// Returns the `default` section, if present.
    pub fn default_section(&self) -> Option<&Section> {
        self.section(Self::DEFAULT_SECTION)
    }

    /// Returns the section called `name`, creating it at the end if missing.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.index.insert(name.to_string(), self.sections.len() - 1);
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Returns true if a section called `name` exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over all sections in definition order, `default` included.
    pub fn sections(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Looks up `name` in `section`, falling back to the `default` section.
    pub fn get_string(&self, section: &str, name: &str) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.get(name))
            .or_else(|| self.default_section().and_then(|s| s.get(name)))
    }

    /// Walks a dotted path from the `default` section.
    ///
    /// See [`resolver::resolve`].
    pub fn resolve(&self, path: &SectionPath) -> Option<&Section> {
        resolver::resolve(self, path)
    }
}
