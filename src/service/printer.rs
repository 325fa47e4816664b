// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical printing of a configuration document.
//!
//! The canonical form lists the `default` section first without a header, then
//! every other section in definition order. Values are escaped, so parsing the
//! output again yields the same document and printing that is byte-identical.

use crate::domain::{Config, Section};
use crate::service::escape::{write_escaped, write_escaped_name};
use std::fmt::{self, Write};

/// Placeholder for the header line when the document has no source file.
const UNKNOWN_SOURCE: &str = "<unknown>";

/// Directive that lets the loader read key names containing `$`.
const DOLLARID_PRAGMA: &str = ".pragma dollarid:on";

/// Writes the canonical form of `config` to `out`.
pub fn write_canonical<W: Write>(out: &mut W, config: &Config) -> fmt::Result {
    let source = config
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
    writeln!(
        out,
        "# This configuration file was linarized and expanded from {}",
        source
    )?;

    if needs_dollarid(config) {
        writeln!(out, "{}", DOLLARID_PRAGMA)?;
    }

    if let Some(default) = config.default_section() {
        write_section_values(out, default)?;
    }

    for section in config
        .sections()
        .filter(|s| s.name() != Config::DEFAULT_SECTION)
    {
        out.write_str("\n[")?;
        write_escaped_name(out, section.name())?;
        out.write_str("]\n")?;
        write_section_values(out, section)?;
    }
    Ok(())
}

fn needs_dollarid(config: &Config) -> bool {
    config
        .sections()
        .any(|section| section.iter().any(|value| value.name().contains('$')))
}

fn write_section_values<W: Write>(out: &mut W, section: &Section) -> fmt::Result {
    for value in section {
        write!(out, "{} = ", value.name())?;
        write_escaped(out, value.value())?;
        out.write_char('\n')?;
    }
    Ok(())
}

/// Returns the canonical form of `config`.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::Config;
/// use osslcfg::service::printer::render;
///
/// let mut config = Config::new().with_source("/etc/ssl/openssl.cnf");
/// config.section_mut("default").push("openssl_conf", "init");
/// config.section_mut("init").push("note", " padded");
///
/// assert_eq!(
///     render(&config),
///     "# This configuration file was linarized and expanded from /etc/ssl/openssl.cnf\n\
///      openssl_conf = init\n\
///      \n\
///      [init]\n\
///      note = \" \"padded\n"
/// );
/// ```
pub fn render(config: &Config) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_canonical(&mut out, config);
    out
}
