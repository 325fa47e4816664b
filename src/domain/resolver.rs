// SPDX-License-Identifier: MIT OR Apache-2.0

//! Section path resolution.
//!
//! A dotted path such as `openssl_conf.providers` is walked from the `default`
//! section: each component names a key in the current section, and the key's
//! value names the next section. The walk fails quietly if any key or section
//! along the way is missing.

use crate::domain::{Config, Section, SectionPath};

/// Resolves `path` to a section, or `None` if any step is missing.
///
/// Keys are matched first-occurrence-wins. Resolution stops at the first
/// missing key or section without looking at anything further.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::{resolver, Config, SectionPath};
///
/// let mut config = Config::new();
/// config.section_mut("default").push("foo", "bar");
/// config.section_mut("bar").push("baz", "qux");
/// config.section_mut("qux").push("k", "v");
///
/// let section = resolver::resolve(&config, &SectionPath::from("foo.baz")).unwrap();
/// assert_eq!(section.name(), "qux");
/// assert!(resolver::resolve(&config, &SectionPath::from("foo.missing")).is_none());
/// ```
pub fn resolve<'a>(config: &'a Config, path: &SectionPath) -> Option<&'a Section> {
    let mut current = config.default_section()?;

    for component in path.components() {
        let next = current.get(component)?;
        current = config.section(next)?;
    }

    tracing::debug!("Resolved section path '{}' to [{}]", path, current.name());
    Some(current)
}
