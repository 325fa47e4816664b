// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider and engine module discovery.
//!
//! This module computes the on-disk paths of the loadable modules a configuration
//! document refers to. Sections that are not configured simply produce no paths.

use crate::domain::{Config, SectionPath};
use crate::ports::InstallLayout;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the FIPS provider inside the modules directory.
pub const FIPS_MODULE: &str = "fips.so";

/// Providers compiled into libcrypto, which have no module on disk.
const BUILTIN_PROVIDERS: [&str; 3] = ["default", "base", "fips"];

/// Locates provider and engine modules.
///
/// # Examples
///
/// ```rust
/// use osslcfg::domain::Config;
/// use osslcfg::service::ModuleLocator;
/// use std::path::PathBuf;
///
/// let mut config = Config::new();
/// config.section_mut("default").push("openssl_conf", "init");
/// config.section_mut("init").push("providers", "provider_sect");
/// config.section_mut("provider_sect").push("default", "default_sect");
/// config.section_mut("provider_sect").push("legacy", "legacy_sect");
///
/// let locator = ModuleLocator::new("/nonexistent/ossl-modules", "/nonexistent/engines");
/// assert_eq!(
///     locator.providers(&config),
///     vec![PathBuf::from("/nonexistent/ossl-modules/legacy.so")]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocator {
    modules_dir: PathBuf,
    engines_dir: PathBuf,
}

impl ModuleLocator {
    /// Creates a locator for the given module directories.
    pub fn new(modules_dir: impl Into<PathBuf>, engines_dir: impl Into<PathBuf>) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            engines_dir: engines_dir.into(),
        }
    }

    /// Creates a locator using the directories of an installation layout.
    pub fn from_layout<L: InstallLayout + ?Sized>(layout: &L) -> Self {
        Self::new(layout.modules_dir(), layout.engines_dir())
    }

    /// Returns the provider module directory.
    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Returns the engine module directory.
    pub fn engines_dir(&self) -> &Path {
        &self.engines_dir
    }

    /// Lists provider module paths in document order.
    ///
    /// The FIPS provider comes first whenever its module exists on disk, even if
    /// the configuration never mentions it: some distributions enable it from the
    /// kernel command line. Builtin providers are skipped. A provider whose section
    /// is missing, or has no `module` key, maps to `<modules_dir>/<name>.so`.
    pub fn providers(&self, config: &Config) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let fips = self.modules_dir.join(FIPS_MODULE);
        if fs::metadata(&fips).is_ok() {
            paths.push(fips);
        }

        let Some(providers) = config.resolve(&SectionPath::from(SectionPath::PROVIDERS)) else {
            tracing::debug!("No providers configured");
            return paths;
        };

        for entry in providers {
            let provider_name = entry.name();
            if BUILTIN_PROVIDERS.contains(&provider_name) {
                continue;
            }

            let module = config
                .section(entry.value())
                .and_then(|section| section.get("module"));
            paths.push(match module {
                Some(module) => self.module_path(&self.modules_dir, module),
                None => self.fallback_module_path(provider_name),
            });
        }
        paths
    }

    /// Lists engine module paths in document order.
    ///
    /// Engines whose section is missing or has no `dynamic_path` are skipped.
    pub fn engines(&self, config: &Config) -> Vec<PathBuf> {
        let Some(engines) = config.resolve(&SectionPath::from(SectionPath::ENGINES)) else {
            tracing::debug!("No engines configured");
            return Vec::new();
        };

        engines
            .iter()
            .filter_map(|entry| {
                let path = config.section(entry.value())?.get("dynamic_path")?;
                Some(self.module_path(&self.engines_dir, path))
            })
            .collect()
    }

    /// `<modules_dir>/<name>.so`, concatenated rather than joined so that a name
    /// containing `/` stays below the modules directory.
    fn fallback_module_path(&self, provider_name: &str) -> PathBuf {
        let mut path = OsString::from(self.modules_dir.as_os_str());
        path.push("/");
        path.push(provider_name);
        path.push(".so");
        PathBuf::from(path)
    }

    /// Absolute values are used verbatim, anything else is relative to `dir`.
    fn module_path(&self, dir: &Path, value: &str) -> PathBuf {
        if value.starts_with('/') {
            PathBuf::from(value)
        } else {
            dir.join(value)
        }
    }
}
