// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! This module contains the OpenSSL configuration dialect parser, the process
//! environment adapter, the environment-driven install layout and, behind the
//! `cli` feature, the command-line surfaces of the binaries.

#[cfg(feature = "cli")]
pub mod cli;
pub mod env_var;
pub mod layout;
pub mod nconf;

// Re-export adapters
pub use env_var::EnvVarAdapter;
pub use layout::OpensslLayout;
pub use nconf::NconfParser;
