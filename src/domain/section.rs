// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named, ordered groups of configuration values.

use crate::domain::ConfigValue;

/// Punctuation allowed in bare section and key names.
const NAME_PUNCTUATION: &str = "!.%&*+,/;?@^~|-";

/// Returns true if `c` may appear unescaped in a section or key name.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::section::is_name_char;
///
/// assert!(is_name_char('a'));
/// assert!(is_name_char('/'));
/// assert!(!is_name_char('#'));
/// assert!(!is_name_char(' '));
/// ```
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || NAME_PUNCTUATION.contains(c)
}

/// A named section of a configuration document.
///
/// Values keep the order in which they were defined. The format does not
/// guarantee unique names, so [`Section::get`] returns the *first* value with a
/// matching name.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::Section;
///
/// let mut section = Section::new("provider_sect");
/// section.push("default", "default_sect");
/// section.push("legacy", "legacy_sect");
///
/// assert_eq!(section.get("legacy"), Some("legacy_sect"));
/// assert_eq!(section.get("fips"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    name: String,
    values: Vec<ConfigValue>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Returns the section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the first entry called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.name() == name)
            .map(ConfigValue::value)
    }

    /// Appends an entry, keeping any earlier entry with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push(ConfigValue::new(name, value));
    }

    /// Defines `name`, dropping any earlier definition and appending the new one.
    ///
    /// This is how the configuration loader records assignments: a redefinition
    /// moves the key to the position of its last occurrence.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.values.retain(|v| v.name() != name);
        self.values.push(ConfigValue::new(name, value));
    }

    /// Iterates over the entries in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigValue> {
        self.values.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a ConfigValue;
    type IntoIter = std::slice::Iter<'a, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_first_match_wins() {
        let mut section = Section::new("s");
        section.push("k", "first");
        section.push("k", "second");

        assert_eq!(section.len(), 2);
        assert_eq!(section.get("k"), Some("first"));
    }

    #[test]
    fn test_section_set_replaces_and_moves() {
        let mut section = Section::new("s");
        section.set("a", "1");
        section.set("b", "2");
        section.set("a", "3");

        let names: Vec<&str> = section.iter().map(ConfigValue::name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(section.get("a"), Some("3"));
    }

    #[test]
    fn test_section_empty_name_lookup() {
        let mut section = Section::new("s");
        section.push("a", "1");
        assert_eq!(section.get(""), None);
    }

    #[test]
    fn test_section_iteration_order() {
        let mut section = Section::new("s");
        section.push("z", "1");
        section.push("a", "2");
        section.push("m", "3");

        let pairs: Vec<(&str, &str)> = (&section).into_iter().map(|v| (v.name(), v.value())).collect();
        assert_eq!(pairs, vec![("z", "1"), ("a", "2"), ("m", "3")]);
    }

    #[test]
    fn test_section_is_empty() {
        let section = Section::new("empty");
        assert!(section.is_empty());
        assert_eq!(section.name(), "empty");
    }
}
