// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-driven OpenSSL installation layout.
//!
//! Paths are layered: explicit overrides win over environment variables, which
//! win over the directories compiled into this crate. The compiled defaults can
//! be changed at build time through the `OPENSSLDIR`, `MODULESDIR` and
//! `ENGINESDIR` environment variables.

use crate::domain::{ConfigError, Result};
use crate::ports::{Environment, InstallLayout};
use std::path::PathBuf;

/// Environment variable naming the configuration file.
pub const OPENSSL_CONF_ENV: &str = "OPENSSL_CONF";

/// Environment variable naming the OpenSSL directory.
pub const OPENSSLDIR_ENV: &str = "OPENSSLDIR";

/// Environment variable naming the provider module directory.
pub const OPENSSL_MODULES_ENV: &str = "OPENSSL_MODULES";

/// Environment variable naming the engine module directory.
pub const OPENSSL_ENGINES_ENV: &str = "OPENSSL_ENGINES";

/// File name of the configuration file inside the OpenSSL directory.
pub const CONFIG_FILE_NAME: &str = "openssl.cnf";

/// Compiled-in OpenSSL directory.
pub const DEFAULT_OPENSSLDIR: &str = match option_env!("OPENSSLDIR") {
    Some(dir) => dir,
    None => "/usr/local/ssl",
};

/// Compiled-in provider module directory.
pub const DEFAULT_MODULESDIR: &str = match option_env!("MODULESDIR") {
    Some(dir) => dir,
    None => "/usr/local/lib/ossl-modules",
};

/// Compiled-in engine module directory.
pub const DEFAULT_ENGINESDIR: &str = match option_env!("ENGINESDIR") {
    Some(dir) => dir,
    None => "/usr/local/lib/engines-3",
};

/// Install layout read from an [`Environment`].
///
/// # Examples
///
/// ```rust
/// use osslcfg::adapters::{EnvVarAdapter, OpensslLayout};
/// use osslcfg::ports::InstallLayout;
/// use std::path::PathBuf;
///
/// let env = EnvVarAdapter::new().with_value("OPENSSL_MODULES", "/opt/ossl/modules");
/// let layout = OpensslLayout::new(env).with_engines_dir("/opt/ossl/engines");
///
/// assert_eq!(layout.modules_dir(), PathBuf::from("/opt/ossl/modules"));
/// assert_eq!(layout.engines_dir(), PathBuf::from("/opt/ossl/engines"));
/// ```
#[derive(Debug, Clone)]
pub struct OpensslLayout<E> {
    env: E,
    config_file: Option<PathBuf>,
    modules_dir: Option<PathBuf>,
    engines_dir: Option<PathBuf>,
}

impl<E: Environment> OpensslLayout<E> {
    /// Creates a layout with no overrides.
    pub fn new(env: E) -> Self {
        Self {
            env,
            config_file: None,
            modules_dir: None,
            engines_dir: None,
        }
    }

    /// Overrides the configuration file.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Overrides the provider module directory.
    pub fn with_modules_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.modules_dir = Some(path.into());
        self
    }

    /// Overrides the engine module directory.
    pub fn with_engines_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.engines_dir = Some(path.into());
        self
    }

    /// Returns the environment this layout reads from.
    pub fn environment(&self) -> &E {
        &self.env
    }

    fn dir_from_env(&self, name: &str, default: &str) -> PathBuf {
        match self.env.var(name) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(default),
        }
    }
}

impl<E: Environment> InstallLayout for OpensslLayout<E> {
    fn default_config_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }

        if let Some(path) = self.env.var(OPENSSL_CONF_ENV) {
            if path.is_empty() {
                return Err(ConfigError::ConfigLocation {
                    message: format!("{} is set but empty", OPENSSL_CONF_ENV),
                });
            }
            tracing::debug!("Configuration file taken from {}: {}", OPENSSL_CONF_ENV, path);
            return Ok(PathBuf::from(path));
        }

        Ok(self
            .dir_from_env(OPENSSLDIR_ENV, DEFAULT_OPENSSLDIR)
            .join(CONFIG_FILE_NAME))
    }

    fn modules_dir(&self) -> PathBuf {
        self.modules_dir
            .clone()
            .unwrap_or_else(|| self.dir_from_env(OPENSSL_MODULES_ENV, DEFAULT_MODULESDIR))
    }

    fn engines_dir(&self) -> PathBuf {
        self.engines_dir
            .clone()
            .unwrap_or_else(|| self.dir_from_env(OPENSSL_ENGINES_ENV, DEFAULT_ENGINESDIR))
    }
}
