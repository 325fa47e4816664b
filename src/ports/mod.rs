// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for various components of the configuration system. These traits are implemented
//! by adapters in the adapters layer.

pub mod environment;
pub mod layout;
pub mod parser;

// Re-export commonly used types
pub use environment::Environment;
pub use layout::InstallLayout;
pub use parser::ConfigParser;
