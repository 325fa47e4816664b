// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installation layout trait definition.
//!
//! This module defines the `InstallLayout` trait, which answers the questions that
//! depend on how OpenSSL is installed on the running system rather than on the
//! configuration file itself.

use crate::domain::Result;
use std::path::PathBuf;

/// Where OpenSSL keeps its configuration file and loadable modules.
///
/// # Examples
///
/// ```rust
/// use osslcfg::domain::Result;
/// use osslcfg::ports::InstallLayout;
/// use std::path::PathBuf;
///
/// struct Fixed;
///
/// impl InstallLayout for Fixed {
///     fn default_config_file(&self) -> Result<PathBuf> {
///         Ok(PathBuf::from("/etc/ssl/openssl.cnf"))
///     }
///     fn modules_dir(&self) -> PathBuf {
///         PathBuf::from("/usr/lib/ossl-modules")
///     }
///     fn engines_dir(&self) -> PathBuf {
///         PathBuf::from("/usr/lib/engines-3")
///     }
/// }
///
/// assert_eq!(Fixed.modules_dir(), PathBuf::from("/usr/lib/ossl-modules"));
/// ```
pub trait InstallLayout {
    /// Returns the configuration file OpenSSL would load by default.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The configuration file path
    /// * `Err(ConfigError::ConfigLocation)` - The location cannot be determined
    fn default_config_file(&self) -> Result<PathBuf>;

    /// Returns the directory holding provider modules.
    fn modules_dir(&self) -> PathBuf;

    /// Returns the directory holding engine modules.
    fn engines_dir(&self) -> PathBuf;
}
