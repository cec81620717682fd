//! Foundation types for the WBS toolchain.
//!
//! This module provides the primitives used throughout the crate:
//! - [`WbsCode`] - Hierarchical dot-codes with numeric ordering
//! - [`next_child_code`] - Collision-free child numbering
//! - [`Warning`], [`Warnings`] - Recoverable data warning collection
//!
//! This module has NO dependencies on other wbsgen modules.

mod code;
mod warnings;

pub use code::{WbsCode, next_child_code};
pub use warnings::{Warning, WarningKind, Warnings};
