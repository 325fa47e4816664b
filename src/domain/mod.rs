// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the in-memory model of an OpenSSL configuration document
//! and the section path resolver. It is independent of any external concerns:
//! nothing here touches the filesystem or the process environment.

pub mod config;
pub mod config_value;
pub mod errors;
pub mod resolver;
pub mod section;
pub mod section_path;

// Re-export commonly used types
pub use config::Config;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, ParseErrorKind, Result};
pub use section::Section;
pub use section_path::SectionPath;
