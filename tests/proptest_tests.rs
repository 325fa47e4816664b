// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check that escaping and canonical printing survive a trip back
//! through the parser for arbitrary values.

mod common;

use common::parser;
use osslcfg::prelude::*;
use proptest::prelude::*;

fn name_strategy() -> &'static str {
    "[a-z][a-z0-9_]{0,8}"
}

fn value_strategy() -> &'static str {
    "\\PC*"
}

fn config_strategy() -> impl Strategy<Value = Config> {
    let entries = prop::collection::vec((name_strategy(), value_strategy()), 0..5);
    let sections = prop::collection::vec((name_strategy(), entries.clone()), 0..4);
    (entries, sections).prop_map(|(defaults, sections)| {
        let mut config = Config::new().with_source("/etc/ssl/openssl.cnf");
        for (name, value) in defaults {
            config.section_mut(Config::DEFAULT_SECTION).set(name, value);
        }
        for (section, values) in sections {
            if section == Config::DEFAULT_SECTION {
                continue;
            }
            let section = config.section_mut(&section);
            for (name, value) in values {
                section.set(name, value);
            }
        }
        config
    })
}

// An escaped value parses back to itself
proptest! {
    #[test]
    fn test_escape_roundtrip(s in value_strategy()) {
        let config = parser().parse(&format!("key = {}\n", escape(&s))).unwrap();
        prop_assert_eq!(config.get_string("default", "key"), Some(s.as_str()));
    }
}

// Escaping a value in a non-default section round-trips too
proptest! {
    #[test]
    fn test_escape_roundtrip_in_section(s in "[ \\t\\n\\r\\x08$#\"'\\\\a-z]{0,16}") {
        let content = format!("[sect]\nkey = {}\n", escape(&s));
        let config = parser().parse(&content).unwrap();
        prop_assert_eq!(config.get_string("sect", "key"), Some(s.as_str()));
    }
}

// Interior spaces are never quoted
proptest! {
    #[test]
    fn test_escape_interior_spaces_unquoted(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let value = format!("{} {}", a, b);
        prop_assert_eq!(escape(&value), value);
    }
}

// Escaped values never contain a raw newline or an unescaped comment marker
proptest! {
    #[test]
    fn test_escape_output_is_single_line(s in "[\\PC\\n\\r\\t]*") {
        let escaped = escape(&s);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\r'));
    }
}

// Printing, parsing and printing again gives identical output
proptest! {
    #[test]
    fn test_render_is_idempotent(config in config_strategy()) {
        let first = render(&config);
        let reparsed = parser()
            .parse(&first)
            .unwrap()
            .with_source("/etc/ssl/openssl.cnf");
        let second = render(&reparsed);
        prop_assert_eq!(first, second);
    }
}

// Section paths resolve the same way through the document and the free function
proptest! {
    #[test]
    fn test_resolve_matches_manual_walk(first in name_strategy(), second in name_strategy()) {
        let mut config = Config::new();
        config.section_mut("default").push("root", "a_sect");
        config.section_mut("a_sect").push(first.clone(), "b_sect");
        config.section_mut("b_sect").push(second.clone(), "leaf");
        config.section_mut("leaf").push("k", "v");

        let path = SectionPath::new(format!("root.{}.{}", first, second));
        let resolved = config.resolve(&path).map(|s| s.name().to_string());
        prop_assert_eq!(resolved.as_deref(), Some("leaf"));
    }
}
