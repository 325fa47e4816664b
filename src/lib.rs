// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenSSL configuration file parsing, canonical printing and module discovery.
//!
//! This crate reads the configuration dialect understood by OpenSSL (named
//! sections, `key = value` assignments, `$variable` substitution, `.include` and
//! `.pragma` directives) into an ordered, fully expanded document, and offers two
//! operations on it:
//!
//! - printing the whole document in a canonical, re-parseable form
//! - resolving `openssl_conf.providers` / `openssl_conf.engines` and listing the
//!   on-disk paths of the provider and engine modules they configure
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The document model (`Config`, `Section`, `ConfigValue`),
//!   dotted section paths and their resolution, errors
//! - **Ports**: Trait definitions for the outside world (`ConfigParser`,
//!   `Environment`, `InstallLayout`)
//! - **Adapters**: The dialect parser, the process environment, the OpenSSL
//!   install layout and the command-line surfaces
//! - **Service**: The value escaper, canonical printer and module locator
//!
//! # Feature Flags
//!
//! - `cli`: Build the `ossl-config` and `ossl-files` binaries (default)
//!
//! # Quick Start
//!
//! ```rust
//! use osslcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = NconfParser::new().parse(
//!     "openssl_conf = init\n\
//!      [init]\n\
//!      providers = provider_sect\n\
//!      [provider_sect]\n\
//!      default = default_sect\n\
//!      legacy = legacy_sect\n",
//! )?;
//!
//! let locator = ModuleLocator::new("/nonexistent/ossl-modules", "/nonexistent/engines");
//! let providers = locator.providers(&config);
//! assert_eq!(providers.len(), 1);
//! assert!(providers[0].ends_with("legacy.so"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{EnvVarAdapter, NconfParser, OpensslLayout};
    pub use crate::domain::{
        Config, ConfigError, ConfigValue, ParseErrorKind, Result, Section, SectionPath,
    };
    pub use crate::ports::{ConfigParser, Environment, InstallLayout};
    pub use crate::service::{escape, render, ModuleLocator};
}
