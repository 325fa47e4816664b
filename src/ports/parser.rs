// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! turning configuration text into a [`Config`] document.

use crate::domain::{Config, Result};
use std::path::Path;

/// A trait for parsing configuration files.
///
/// Parsers produce a fully expanded document: includes are merged into one flat
/// section namespace and variable references are replaced by their values, so
/// consumers never see raw directives.
///
/// # Examples
///
/// ```rust
/// use osslcfg::domain::{Config, Result};
/// use osslcfg::ports::ConfigParser;
/// use std::path::Path;
///
/// struct OneKeyParser;
///
/// impl ConfigParser for OneKeyParser {
///     fn parse(&self, content: &str) -> Result<Config> {
///         let mut config = Config::new();
///         config.section_mut("default").push("raw", content);
///         Ok(config)
///     }
///
///     fn parse_file(&self, path: &Path) -> Result<Config> {
///         Ok(self.parse(&std::fs::read_to_string(path)?)?.with_source(path))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["raw"]
///     }
/// }
///
/// let config = OneKeyParser.parse("hello").unwrap();
/// assert_eq!(config.get_string("default", "raw"), Some("hello"));
/// ```
pub trait ConfigParser {
    /// Parses configuration text.
    ///
    /// Relative includes are resolved against the current directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - The parsed document
    /// * `Err(ConfigError)` - A syntax error, with its line number
    fn parse(&self, content: &str) -> Result<Config>;

    /// Reads and parses the file at `path`, following its includes.
    ///
    /// The returned document records `path` as its source.
    fn parse_file(&self, path: &Path) -> Result<Config>;

    /// Returns the file extensions (without the leading dot) this parser reads.
    ///
    /// Directory includes only pick up files with one of these extensions.
    fn supported_extensions(&self) -> &[&str];
}
