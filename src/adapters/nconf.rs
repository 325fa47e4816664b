// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenSSL configuration file adapter.
//!
//! This module provides a parser for the configuration dialect read by OpenSSL's
//! `NCONF` loader: `[section]` headers, `key = value` and `section::key = value`
//! assignments, `$variable` references, quoting and backslash escapes, line
//! continuations, and the `.include` and `.pragma` directives.
//!
//! Includes are followed while loading and merged into one flat section
//! namespace, so the resulting [`Config`] never contains unexpanded text.

use crate::adapters::EnvVarAdapter;
use crate::domain::section::is_name_char;
use crate::domain::{Config, ConfigError, ParseErrorKind, Result};
use crate::ports::{ConfigParser, Environment};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Longest value variable expansion may produce.
const MAX_CONF_VALUE_LENGTH: usize = 65536;

/// Default limit on nested `.include` directives.
const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Environment variable overriding the directory relative includes are read from.
pub const OPENSSL_CONF_INCLUDE_ENV: &str = "OPENSSL_CONF_INCLUDE";

/// Section whose variables fall back to the process environment.
const ENV_SECTION: &str = "ENV";

/// Name reported in errors for configuration parsed from a string.
const STRING_SOURCE: &str = "<string>";

/// Parser for the OpenSSL configuration dialect.
///
/// # Examples
///
/// ```rust
/// use osslcfg::adapters::NconfParser;
/// use osslcfg::ports::ConfigParser;
///
/// let parser = NconfParser::new();
/// let config = parser.parse("dir = /etc/ssl\n[paths]\ncerts = $dir/certs\n").unwrap();
/// assert_eq!(config.get_string("paths", "certs"), Some("/etc/ssl/certs"));
/// ```
#[derive(Debug, Clone)]
pub struct NconfParser<E = EnvVarAdapter> {
    env: E,
    max_include_depth: usize,
}

impl NconfParser<EnvVarAdapter> {
    /// Creates a parser that reads the process environment.
    pub fn new() -> Self {
        Self::with_environment(EnvVarAdapter::new())
    }
}

impl Default for NconfParser<EnvVarAdapter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> NconfParser<E> {
    /// Creates a parser that resolves `ENV` variables and `OPENSSL_CONF_INCLUDE`
    /// through `env`.
    pub fn with_environment(env: E) -> Self {
        Self {
            env,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Sets how deeply `.include` directives may nest.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    fn loader(&self) -> Loader<'_, E> {
        let mut config = Config::new();
        config.section_mut(Config::DEFAULT_SECTION);
        Loader {
            parser: self,
            config,
            section: Config::DEFAULT_SECTION.to_string(),
            dollarid: false,
            abspath: false,
            includedir: None,
        }
    }
}

impl<E: Environment> ConfigParser for NconfParser<E> {
    fn parse(&self, content: &str) -> Result<Config> {
        let mut loader = self.loader();
        loader.load_text(content, Path::new(STRING_SOURCE), 0, false)?;
        Ok(loader.config)
    }

    fn parse_file(&self, path: &Path) -> Result<Config> {
        tracing::debug!("Loading configuration from {}", path.display());
        let content = read_config_file(path)?;
        let mut loader = self.loader();
        loader.load_text(&content, path, 0, false)?;
        Ok(loader.config.with_source(path))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cnf", "conf"]
    }
}

/// Reads a configuration file, rejecting anything over the size limit.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing the load.
/// The file handle is scoped to this function and closed on every return path.
fn read_config_file(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: "nconf".to_string(),
        message: format!("Failed to read file metadata: {}", path.display()),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: "nconf".to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
            source: None,
        });
    }

    let bytes = fs::read(path).map_err(|e| ConfigError::SourceError {
        source_name: "nconf".to_string(),
        message: format!("Failed to read configuration file: {}", path.display()),
        source: Some(Box::new(e)),
    })?;

    Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::debug!(
            "Configuration file {} is not valid UTF-8, replacing invalid bytes",
            path.display()
        );
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    }))
}

fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// A logical line, with helpers mirroring the loader's scanning rules.
///
/// Every helper takes and returns a position; positions never exceed the line
/// length.
struct Line {
    chars: Vec<char>,
}

impl Line {
    fn new(text: &str) -> Self {
        Line {
            chars: text.chars().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn text(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    fn scan_esc(&self, pos: usize) -> usize {
        if pos + 1 >= self.len() {
            pos + 1
        } else {
            pos + 2
        }
    }

    fn scan_quote(&self, mut pos: usize) -> usize {
        let quote = self.chars[pos];
        pos += 1;
        while let Some(c) = self.at(pos) {
            if c == quote {
                return pos + 1;
            }
            if c == '\\' {
                pos += 1;
                if pos >= self.len() {
                    return pos;
                }
            }
            pos += 1;
        }
        pos
    }

    /// Cuts the line at the first `#` outside quotes and escapes.
    fn clear_comments(&mut self) {
        let mut pos = 0;
        while let Some(c) = self.at(pos) {
            if c == '#' {
                self.chars.truncate(pos);
                return;
            } else if is_quote(c) {
                pos = self.scan_quote(pos);
            } else if c == '\\' {
                pos = self.scan_esc(pos);
            } else {
                pos += 1;
            }
        }
    }

    fn eat_ws(&self, mut pos: usize) -> usize {
        while self.at(pos).is_some_and(is_ws) {
            pos += 1;
        }
        pos
    }

    fn eat_alpha_numeric(&self, mut pos: usize, dollarid: bool) -> usize {
        while let Some(c) = self.at(pos) {
            if c == '\\' {
                pos = self.scan_esc(pos);
            } else if is_name_char(c) || (dollarid && c == '$') {
                pos += 1;
            } else {
                break;
            }
        }
        pos
    }

    /// Returns `from..end` with trailing whitespace removed.
    fn trimmed(&self, from: usize) -> &[char] {
        let mut end = self.len();
        while end > from && is_ws(self.chars[end - 1]) {
            end -= 1;
        }
        &self.chars[from.min(end)..end]
    }
}

/// State carried across one load, including every file it includes.
struct Loader<'p, E> {
    parser: &'p NconfParser<E>,
    config: Config,
    section: String,
    dollarid: bool,
    abspath: bool,
    includedir: Option<String>,
}

impl<E: Environment> Loader<'_, E> {
    fn load_text(&mut self, text: &str, file: &Path, depth: usize, in_dir: bool) -> Result<()> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut pending = String::new();
        let mut line_no = 0;

        for (idx, raw) in text.split('\n').enumerate() {
            line_no = idx + 1;
            pending.push_str(raw.trim_end_matches(['\r', '\n']));

            if ends_with_continuation(&pending) {
                pending.pop();
                continue;
            }

            let logical = std::mem::take(&mut pending);
            self.process_line(&logical, file, line_no, depth, in_dir)?;
        }

        if !pending.is_empty() {
            self.process_line(&pending, file, line_no, depth, in_dir)?;
        }
        Ok(())
    }

    fn process_line(
        &mut self,
        text: &str,
        file: &Path,
        line_no: usize,
        depth: usize,
        in_dir: bool,
    ) -> Result<()> {
        let err = |kind: ParseErrorKind| ConfigError::ParseError {
            file: file.to_path_buf(),
            line: line_no,
            kind,
        };

        let mut line = Line::new(text);
        line.clear_comments();

        let s = line.eat_ws(0);
        match line.at(s) {
            None => Ok(()),
            Some('[') => {
                let name = self.section_header(&line, s + 1).map_err(err)?;
                self.config.section_mut(&name);
                self.section = name;
                Ok(())
            }
            Some(_) => self.statement(&line, s, depth, in_dir).map_err(|e| match e {
                Statement::Parse(kind) => err(kind),
                Statement::Other(e) => e,
            }),
        }
    }

    fn section_header(&self, line: &Line, pos: usize) -> std::result::Result<String, ParseErrorKind> {
        let start = line.eat_ws(pos);
        let mut scan = start;
        let end = loop {
            let end = line.eat_alpha_numeric(scan, self.dollarid);
            let next = line.eat_ws(end);
            match line.at(next) {
                Some(']') => break end,
                Some(_) if next != scan => scan = next,
                _ => return Err(ParseErrorKind::MissingCloseSquareBracket),
            }
        };
        self.str_copy(None, &line.chars[start..end])
    }

    fn statement(
        &mut self,
        line: &Line,
        start: usize,
        depth: usize,
        in_dir: bool,
    ) -> std::result::Result<(), Statement> {
        let mut name_start = start;
        let mut end = line.eat_alpha_numeric(start, self.dollarid);
        let target = if line.at(end) == Some(':') && line.at(end + 1) == Some(':') {
            let target = self
                .str_copy(None, &line.chars[start..end])
                .map_err(Statement::Parse)?;
            name_start = end + 2;
            end = line.eat_alpha_numeric(name_start, self.dollarid);
            target
        } else {
            self.section.clone()
        };
        let mut p = line.eat_ws(end);
        let name = line.text(name_start, end);

        if let Some(after) = directive(&name, ".pragma", name_start) {
            if p != after || line.at(p) == Some('=') {
                if line.at(p) == Some('=') {
                    p = line.eat_ws(p + 1);
                }
                let body: String = line.trimmed(p).iter().collect();
                return self.pragma(&body).map_err(Statement::Parse);
            }
        }

        if let Some(after) = directive(&name, ".include", name_start) {
            if p != after || line.at(p) == Some('=') {
                if line.at(p) == Some('=') {
                    p = line.eat_ws(p + 1);
                }
                let include = self
                    .str_copy(Some(&target), line.trimmed(p))
                    .map_err(Statement::Parse)?;
                return self.include(&include, depth, in_dir);
            }
        }

        if line.at(p) != Some('=') {
            let here = line.text(p.min(line.len()), line.len());
            return Err(Statement::Parse(ParseErrorKind::MissingEqualSign(here)));
        }

        let value_start = line.eat_ws(p + 1);
        let value = self
            .str_copy(Some(&target), line.trimmed(value_start))
            .map_err(Statement::Parse)?;
        self.config.section_mut(&target).set(name, value);
        Ok(())
    }

    fn pragma(&mut self, body: &str) -> std::result::Result<(), ParseErrorKind> {
        let invalid = || ParseErrorKind::InvalidPragma(body.to_string());
        let (key, value) = body.split_once(':').ok_or_else(invalid)?;
        if key.is_empty() || value.is_empty() {
            return Err(invalid());
        }
        let key = key.trim_end_matches(is_ws);
        let value = value.trim_start_matches(is_ws);

        match key {
            "dollarid" => self.dollarid = parse_bool(value)?,
            "abspath" => self.abspath = parse_bool(value)?,
            "includedir" => self.includedir = Some(value.to_string()),
            _ => tracing::debug!("Ignoring unknown pragma '{}'", key),
        }
        Ok(())
    }

    fn include(&mut self, include: &str, depth: usize, in_dir: bool) -> std::result::Result<(), Statement> {
        let include_dir = self
            .parser
            .env
            .var(OPENSSL_CONF_INCLUDE_ENV)
            .filter(|dir| !dir.is_empty())
            .or_else(|| self.includedir.clone());

        let path = match include_dir {
            Some(dir) if !Path::new(include).is_absolute() => PathBuf::from(format!("{}/{}", dir, include)),
            _ => PathBuf::from(include),
        };

        if self.abspath && !path.is_absolute() {
            return Err(Statement::Parse(ParseErrorKind::RelativePath(
                path.display().to_string(),
            )));
        }

        if depth >= self.parser.max_include_depth {
            return Err(Statement::Parse(ParseErrorKind::IncludeTooDeep(
                self.parser.max_include_depth,
            )));
        }

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Skipping missing include {}: {}", path.display(), e);
                return Ok(());
            }
        };

        if metadata.is_dir() {
            if in_dir {
                tracing::warn!(
                    "Skipping recursive directory include {}",
                    path.display()
                );
                return Ok(());
            }
            for file in self.directory_entries(&path)? {
                self.include_file(&file, depth + 1, true)?;
            }
            Ok(())
        } else {
            self.include_file(&path, depth + 1, in_dir)
        }
    }

    fn include_file(&mut self, path: &Path, depth: usize, in_dir: bool) -> std::result::Result<(), Statement> {
        tracing::debug!("Including {}", path.display());
        let content = read_config_file(path)?;
        Ok(self.load_text(&content, path, depth, in_dir)?)
    }

    /// Lists the files of an included directory that the parser can read, sorted.
    fn directory_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let extensions = self.parser.supported_extensions();
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let readable = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
            if readable && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Expands quoting, escapes and variable references in `from`.
    fn str_copy(&self, section: Option<&str>, from: &[char]) -> std::result::Result<String, ParseErrorKind> {
        let mut out = String::new();
        let mut i = 0;

        while i < from.len() {
            let c = from[i];
            if is_quote(c) {
                i += 1;
                while i < from.len() && from[i] != c {
                    if from[i] == '\\' {
                        i += 1;
                        if i >= from.len() {
                            break;
                        }
                    }
                    out.push(from[i]);
                    i += 1;
                }
                if i < from.len() {
                    i += 1;
                }
            } else if c == '\\' {
                let Some(&escaped) = from.get(i + 1) else {
                    break;
                };
                out.push(match escaped {
                    'r' => '\r',
                    'n' => '\n',
                    'b' => '\u{8}',
                    't' => '\t',
                    other => other,
                });
                i += 2;
            } else if c == '$'
                && (!self.dollarid || matches!(from.get(i + 1), Some('{') | Some('(')))
            {
                let (value, next) = self.expand_variable(section, from, i + 1)?;
                if out.len() + value.len() > MAX_CONF_VALUE_LENGTH {
                    return Err(ParseErrorKind::VariableExpansionTooLong);
                }
                out.push_str(&value);
                i = next;
            } else {
                out.push(c);
                i += 1;
            }
        }
        Ok(out)
    }

    /// Expands the reference starting just after a `$`; returns its value and
    /// the position after the reference.
    fn expand_variable(
        &self,
        section: Option<&str>,
        from: &[char],
        start: usize,
    ) -> std::result::Result<(String, usize), ParseErrorKind> {
        let close = match from.get(start) {
            Some('{') => Some('}'),
            Some('(') => Some(')'),
            _ => None,
        };
        let mut s = if close.is_some() { start + 1 } else { start };
        let name_char = |c: char| is_alnum(c) || (self.dollarid && c == '$');

        let mut e = s;
        while e < from.len() && name_char(from[e]) {
            e += 1;
        }

        let mut var_section = section.map(str::to_string);
        if from.get(e) == Some(&':') && from.get(e + 1) == Some(&':') {
            var_section = Some(from[s..e].iter().collect());
            e += 2;
            s = e;
            while e < from.len() && name_char(from[e]) {
                e += 1;
            }
        }
        let name: String = from[s..e].iter().collect();

        if let Some(close) = close {
            if from.get(e) != Some(&close) {
                return Err(ParseErrorKind::NoCloseBrace);
            }
            e += 1;
        }

        match self.lookup(var_section.as_deref(), &name) {
            Some(value) => Ok((value, e)),
            None => Err(ParseErrorKind::VariableHasNoValue(match var_section {
                Some(sect) if Some(sect.as_str()) != section => format!("{}::{}", sect, name),
                _ => name,
            })),
        }
    }

    /// Looks a variable up in `section`, then the environment for `ENV`, then `default`.
    fn lookup(&self, section: Option<&str>, name: &str) -> Option<String> {
        if let Some(section) = section {
            if let Some(value) = self.config.section(section).and_then(|s| s.get(name)) {
                return Some(value.to_string());
            }
            if section == ENV_SECTION {
                if let Some(value) = self.parser.env.var(name) {
                    return Some(value);
                }
            }
        }
        self.config
            .default_section()
            .and_then(|s| s.get(name))
            .map(str::to_string)
    }
}

/// Failure while handling one statement: either a syntax problem on this line
/// or an error raised while loading an included file.
enum Statement {
    Parse(ParseErrorKind),
    Other(ConfigError),
}

impl From<ConfigError> for Statement {
    fn from(e: ConfigError) -> Self {
        Statement::Other(e)
    }
}

/// If `name` starts with `directive`, returns the line position right after it.
fn directive(name: &str, directive: &str, name_start: usize) -> Option<usize> {
    name.starts_with(directive)
        .then(|| name_start + directive.chars().count())
}

/// True if the line ends in a backslash that is not itself escaped.
fn ends_with_continuation(line: &str) -> bool {
    let mut rev = line.chars().rev();
    rev.next() == Some('\\') && rev.next() != Some('\\')
}

fn parse_bool(value: &str) -> std::result::Result<bool, ParseErrorKind> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(ParseErrorKind::InvalidPragma(other.to_string())),
    }
}
