// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value escaping for the configuration dialect.
//!
//! Quoted strings in the dialect disable the `\n`, `\r`, `\b` and `\t` escapes, so
//! values are escaped character by character instead. Only a leading or trailing
//! space is quoted, because the loader would otherwise trim it.

use crate::domain::section::is_name_char;
use std::fmt::{self, Write};

/// Writes `value` to `out` in escaped form.
///
/// # Examples
///
/// ```
/// use osslcfg::service::escape::write_escaped;
///
/// let mut out = String::new();
/// write_escaped(&mut out, "$HOME").unwrap();
/// assert_eq!(out, "\\$HOME");
/// ```
pub fn write_escaped<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    let last = value.chars().count().saturating_sub(1);

    for (idx, c) in value.chars().enumerate() {
        match c {
            '"' | '\'' | '#' | '\\' | '$' => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\u{8}' => out.write_str("\\b")?,
            '\t' => out.write_str("\\t")?,
            ' ' if idx == 0 || idx == last => out.write_str("\" \"")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Returns `value` in escaped form.
///
/// # Examples
///
/// ```
/// use osslcfg::service::escape::escape;
///
/// assert_eq!(escape("a b c"), "a b c");
/// assert_eq!(escape(" padded "), "\" \"padded\" \"");
/// assert_eq!(escape("line\nbreak"), "line\\nbreak");
/// ```
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    // Writing into a String cannot fail
    let _ = write_escaped(&mut out, value);
    out
}

/// Writes a section name so that a `[name]` header reads back as `name`.
///
/// Name characters and interior spaces are written as is; everything else is
/// backslash-escaped.
///
/// # Examples
///
/// ```
/// use osslcfg::service::escape::write_escaped_name;
///
/// let mut out = String::new();
/// write_escaped_name(&mut out, "my#sect").unwrap();
/// assert_eq!(out, "my\\#sect");
/// ```
pub fn write_escaped_name<W: Write>(out: &mut W, name: &str) -> fmt::Result {
    let last = name.chars().count().saturating_sub(1);

    for (idx, c) in name.chars().enumerate() {
        match c {
            c if is_name_char(c) => out.write_char(c)?,
            ' ' if idx != 0 && idx != last => out.write_char(' ')?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\u{8}' => out.write_str("\\b")?,
            '\t' => out.write_str("\\t")?,
            _ => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("openssl_init"), "openssl_init");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape(r#"a"b'c#d\e$f"#), r#"a\"b\'c\#d\\e\$f"#);
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape("a\nb\rc\u{8}d\te"), "a\\nb\\rc\\bd\\te");
    }

    #[test]
    fn test_escape_interior_spaces_untouched() {
        assert_eq!(escape("a b c"), "a b c");
    }

    #[test]
    fn test_escape_leading_and_trailing_spaces() {
        assert_eq!(escape(" a"), "\" \"a");
        assert_eq!(escape("a "), "a\" \"");
        assert_eq!(escape("  a  "), "\" \" a \" \"");
    }

    #[test]
    fn test_escape_single_space() {
        assert_eq!(escape(" "), "\" \"");
    }

    #[test]
    fn test_escape_multibyte_trailing_space() {
        assert_eq!(escape("é "), "é\" \"");
    }

    fn escape_name(name: &str) -> String {
        let mut out = String::new();
        write_escaped_name(&mut out, name).unwrap();
        out
    }

    #[test]
    fn test_escape_name() {
        assert_eq!(escape_name("provider_sect"), "provider_sect");
        assert_eq!(escape_name("my sect"), "my sect");
        assert_eq!(escape_name("a#b"), "a\\#b");
        assert_eq!(escape_name("x$y"), "x\\$y");
        assert_eq!(escape_name(" edge "), "\\ edge\\ ");
        assert_eq!(escape_name("tab\there"), "tab\\there");
    }

    #[test]
    fn test_escape_other_characters_pass_through() {
        assert_eq!(escape("/usr/lib/ossl-modules/fips.so"), "/usr/lib/ossl-modules/fips.so");
        assert_eq!(escape("a=b;c"), "a=b;c");
    }
}
