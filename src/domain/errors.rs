// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when locating, reading, or
//! parsing OpenSSL configuration files. All errors use `thiserror` for proper error
//! handling and conversion.
//!
//! Note that a dotted path which does not resolve is *not* an error: resolution
//! returns `None` and callers treat that as "nothing configured here".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The reason a configuration file failed to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A section header is missing its closing `]`.
    MissingCloseSquareBracket,
    /// An assignment line has no `=`. Carries the text from where `=` was expected.
    MissingEqualSign(String),
    /// A `${name}` or `$(name)` reference is not closed.
    NoCloseBrace,
    /// A `$name` reference names a variable that is not defined.
    VariableHasNoValue(String),
    /// Variable expansion produced a value over the length limit.
    VariableExpansionTooLong,
    /// A `.pragma` directive is malformed or has an invalid boolean.
    InvalidPragma(String),
    /// An `.include` path is relative while the `abspath` pragma is on.
    RelativePath(String),
    /// Includes are nested deeper than the loader allows.
    IncludeTooDeep(usize),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCloseSquareBracket => write!(f, "missing close square bracket"),
            Self::MissingEqualSign(here) => write!(f, "missing equal sign: HERE-->{}", here),
            Self::NoCloseBrace => write!(f, "no close brace"),
            Self::VariableHasNoValue(name) => write!(f, "variable has no value: {}", name),
            Self::VariableExpansionTooLong => write!(f, "variable expansion too long"),
            Self::InvalidPragma(pragma) => write!(f, "invalid pragma: {}", pragma),
            Self::RelativePath(path) => write!(f, "relative path: {}", path),
            Self::IncludeTooDeep(depth) => write!(f, "includes nested deeper than {}", depth),
        }
    }
}

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use osslcfg::domain::errors::{ConfigError, ParseErrorKind};
///
/// let error = ConfigError::ParseError {
///     file: "/etc/ssl/openssl.cnf".into(),
///     line: 12,
///     kind: ParseErrorKind::MissingCloseSquareBracket,
/// };
/// assert_eq!(error.line(), Some(12));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The path of the configuration file could not be determined.
    #[error("Unable to determine configuration file location: {message}")]
    ConfigLocation {
        /// Why the location is unknown
        message: String,
    },

    /// The configuration file has a syntax error.
    #[error("Error on line {line} of configuration file {}: {kind}", file.display())]
    ParseError {
        /// The file that failed to parse
        file: PathBuf,
        /// 1-based line number of the offending line
        line: usize,
        /// What went wrong
        kind: ParseErrorKind,
    },

    /// A configuration file could not be read.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The command line selected nothing to do.
    #[error("{message}")]
    UsageError {
        /// Guidance for the user
        message: String,
    },

    /// An I/O error occurred while reading or writing configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns the line number for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::ParseError { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_location_error() {
        let error = ConfigError::ConfigLocation {
            message: "OPENSSL_CONF is empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unable to determine configuration file location: OPENSSL_CONF is empty"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let error = ConfigError::ParseError {
            file: PathBuf::from("/tmp/openssl.cnf"),
            line: 3,
            kind: ParseErrorKind::MissingEqualSign("foo".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Error on line 3 of configuration file /tmp/openssl.cnf: missing equal sign: HERE-->foo"
        );
        assert_eq!(error.line(), Some(3));
    }

    #[test]
    fn test_parse_error_kinds_display() {
        assert_eq!(ParseErrorKind::NoCloseBrace.to_string(), "no close brace");
        assert_eq!(
            ParseErrorKind::VariableHasNoValue("x".to_string()).to_string(),
            "variable has no value: x"
        );
        assert_eq!(
            ParseErrorKind::RelativePath("a.cnf".to_string()).to_string(),
            "relative path: a.cnf"
        );
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "nconf".to_string(),
            message: "Failed to read configuration file".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'nconf' error: Failed to read configuration file"
        );
        assert_eq!(error.line(), None);
    }

    #[test]
    fn test_usage_error() {
        let error = ConfigError::UsageError {
            message: "No options were provided".to_string(),
        };
        assert_eq!(error.to_string(), "No options were provided");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
