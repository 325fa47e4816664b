// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the operations performed on a loaded document.
//!
//! This module contains the value escaper, the canonical printer, and the
//! provider/engine module locator.

pub mod escape;
pub mod locator;
pub mod printer;

// Re-export commonly used types
pub use escape::escape;
pub use locator::ModuleLocator;
pub use printer::render;
