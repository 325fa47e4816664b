// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line surfaces for the `ossl-config` and `ossl-files` binaries.
//!
//! Argument parsing uses `clap`. The operations themselves write to any
//! `io::Write`, so they can be exercised without spawning a process. Nothing is
//! written until the configuration has loaded successfully.

use crate::adapters::{EnvVarAdapter, NconfParser, OpensslLayout};
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, InstallLayout};
use crate::service::{printer, ModuleLocator};
use clap::{ArgAction, Args, Parser};
use std::io::Write;
use std::path::PathBuf;

/// Message printed when `ossl-files` is run without a selector.
pub const NO_OPTIONS_MESSAGE: &str =
    "No options were provided, so no output was produced. See --help for instructions.";

/// Arguments shared by both binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file to read instead of the system default
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Log more detail to stderr (repeat for trace output)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Builds the install layout: flags over environment over compiled defaults.
    pub fn layout(&self) -> OpensslLayout<EnvVarAdapter> {
        let layout = OpensslLayout::new(EnvVarAdapter::new());
        match &self.file {
            Some(file) => layout.with_config_file(file),
            None => layout,
        }
    }
}

/// Arguments of `ossl-config`.
#[derive(Parser, Debug)]
#[command(
    name = "ossl-config",
    version,
    about = "Print the OpenSSL configuration file with all includes and variables expanded"
)]
pub struct ConfigArgs {
    /// Options shared with `ossl-files`
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments of `ossl-files`.
///
/// `--help` is handled by the caller: usage goes to stderr and the process exits
/// unsuccessfully.
#[derive(Parser, Debug)]
#[command(
    name = "ossl-files",
    version,
    about = "Print the paths of files used by OpenSSL on this system",
    disable_help_flag = true
)]
pub struct FilesArgs {
    /// Print the path of the OpenSSL configuration file on this system
    #[arg(long)]
    pub config: bool,

    /// Print the path of any OpenSSL ENGINEs configured in the configuration file
    #[arg(long)]
    pub engines: bool,

    /// Print the path of any OpenSSL providers configured in the configuration file
    #[arg(long)]
    pub providers: bool,

    /// Directory holding provider modules
    #[arg(long, value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Directory holding engine modules
    #[arg(long, value_name = "DIR")]
    pub engines_dir: Option<PathBuf>,

    /// Print this help output
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Options shared with `ossl-config`
    #[command(flatten)]
    pub common: CommonArgs,
}

impl FilesArgs {
    /// Returns which listings were requested.
    pub fn selection(&self) -> Selection {
        Selection {
            config: self.config,
            engines: self.engines,
            providers: self.providers,
        }
    }

    /// Builds the install layout, applying the directory overrides.
    pub fn layout(&self) -> OpensslLayout<EnvVarAdapter> {
        let mut layout = self.common.layout();
        if let Some(dir) = &self.modules_dir {
            layout = layout.with_modules_dir(dir);
        }
        if let Some(dir) = &self.engines_dir {
            layout = layout.with_engines_dir(dir);
        }
        layout
    }
}

/// The listings `ossl-files` can print, in output order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// The configuration file path
    pub config: bool,
    /// Engine module paths
    pub engines: bool,
    /// Provider module paths
    pub providers: bool,
}

impl Selection {
    /// Returns true if nothing was selected.
    pub fn is_empty(&self) -> bool {
        !(self.config || self.engines || self.providers)
    }
}

/// Loads the default configuration file and writes its canonical form to `out`.
pub fn print_canonical<P, L, W>(parser: &P, layout: &L, out: &mut W) -> Result<()>
where
    P: ConfigParser + ?Sized,
    L: InstallLayout + ?Sized,
    W: Write + ?Sized,
{
    let path = layout.default_config_file()?;
    let config = parser.parse_file(&path)?;
    out.write_all(printer::render(&config).as_bytes())?;
    Ok(())
}

/// Writes the selected listings to `out`, one path per line.
///
/// The configuration file is loaded before anything is printed, so a broken file
/// produces no output at all.
pub fn list_files<P, L, W>(selection: Selection, parser: &P, layout: &L, out: &mut W) -> Result<()>
where
    P: ConfigParser + ?Sized,
    L: InstallLayout + ?Sized,
    W: Write + ?Sized,
{
    if selection.is_empty() {
        return Err(ConfigError::UsageError {
            message: NO_OPTIONS_MESSAGE.to_string(),
        });
    }

    let path = layout.default_config_file()?;
    let config = parser.parse_file(&path)?;
    let locator = ModuleLocator::from_layout(layout);

    let mut lines = Vec::new();
    if selection.config {
        lines.push(path);
    }
    if selection.engines {
        lines.extend(locator.engines(&config));
    }
    if selection.providers {
        lines.extend(locator.providers(&config));
    }

    for line in lines {
        writeln!(out, "{}", line.display())?;
    }
    Ok(())
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows `verbose`.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Prints `error` and its chain of causes to stderr.
pub fn report(error: &ConfigError) {
    eprintln!("{}", error);
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Parser used by both binaries.
pub fn default_parser() -> NconfParser<EnvVarAdapter> {
    NconfParser::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "\
openssl_conf = openssl_init

[openssl_init]
providers = provider_sect
engines = engine_sect

[provider_sect]
default = default_sect
legacy = legacy_sect

[default_sect]
activate = 1

[engine_sect]
e1 = e1_sect

[e1_sect]
dynamic_path = relpath.so
";

    fn fixture(content: &str) -> (TempDir, OpensslLayout<EnvVarAdapter>) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("openssl.cnf");
        fs::write(&file, content).unwrap();
        let layout = OpensslLayout::new(EnvVarAdapter::with_values(HashMap::new()))
            .with_config_file(&file)
            .with_modules_dir(dir.path().join("modules"))
            .with_engines_dir("/usr/lib/engines");
        (dir, layout)
    }

    fn parser() -> NconfParser<EnvVarAdapter> {
        NconfParser::with_environment(EnvVarAdapter::with_values(HashMap::new()))
    }

    #[test]
    fn test_files_args_selectors() {
        let args = FilesArgs::try_parse_from(["ossl-files", "--providers", "--config"]).unwrap();
        assert_eq!(
            args.selection(),
            Selection {
                config: true,
                engines: false,
                providers: true
            }
        );
        assert!(!args.help);
    }

    #[test]
    fn test_files_args_help_flag() {
        let args = FilesArgs::try_parse_from(["ossl-files", "--help"]).unwrap();
        assert!(args.help);
        assert!(args.selection().is_empty());
    }

    #[test]
    fn test_files_args_unknown_option() {
        assert!(FilesArgs::try_parse_from(["ossl-files", "--pkcs11"]).is_err());
    }

    #[test]
    fn test_files_args_directory_overrides() {
        let args = FilesArgs::try_parse_from([
            "ossl-files",
            "--engines",
            "--modules-dir",
            "/m",
            "--engines-dir",
            "/e",
            "-f",
            "/tmp/openssl.cnf",
        ])
        .unwrap();
        let layout = args.layout();
        assert_eq!(layout.modules_dir(), PathBuf::from("/m"));
        assert_eq!(layout.engines_dir(), PathBuf::from("/e"));
        assert_eq!(
            layout.default_config_file().unwrap(),
            PathBuf::from("/tmp/openssl.cnf")
        );
    }

    #[test]
    fn test_config_args_verbose() {
        let args = ConfigArgs::try_parse_from(["ossl-config", "-vv"]).unwrap();
        assert_eq!(args.common.verbose, 2);
        assert!(args.common.file.is_none());
    }

    #[test]
    fn test_list_files_nothing_selected() {
        let (_dir, layout) = fixture(CONFIG);
        let mut out = Vec::new();
        let err = list_files(Selection::default(), &parser(), &layout, &mut out).unwrap_err();

        assert!(matches!(err, ConfigError::UsageError { .. }));
        assert_eq!(err.to_string(), NO_OPTIONS_MESSAGE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_files_all_in_order() {
        let (dir, layout) = fixture(CONFIG);
        let selection = Selection {
            config: true,
            engines: true,
            providers: true,
        };
        let mut out = Vec::new();
        list_files(selection, &parser(), &layout, &mut out).unwrap();

        let expected = format!(
            "{}\n/usr/lib/engines/relpath.so\n{}\n",
            dir.path().join("openssl.cnf").display(),
            dir.path().join("modules").join("legacy.so").display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_list_files_parse_error_prints_nothing() {
        let (_dir, layout) = fixture("ok = 1\n[broken\n");
        let selection = Selection {
            config: true,
            ..Selection::default()
        };
        let mut out = Vec::new();
        let err = list_files(selection, &parser(), &layout, &mut out).unwrap_err();

        assert_eq!(err.line(), Some(2));
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_canonical() {
        let (dir, layout) = fixture("a = 1\n[s]\nb = \" x\"\n");
        let mut out = Vec::new();
        print_canonical(&parser(), &layout, &mut out).unwrap();

        let expected = format!(
            "# This configuration file was linarized and expanded from {}\na = 1\n\n[s]\nb = \" \"x\n",
            dir.path().join("openssl.cnf").display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_print_canonical_missing_file() {
        let layout = OpensslLayout::new(EnvVarAdapter::with_values(HashMap::new()))
            .with_config_file("/nonexistent/osslcfg/openssl.cnf");
        let mut out = Vec::new();
        assert!(print_canonical(&parser(), &layout, &mut out).is_err());
        assert!(out.is_empty());
    }
}
