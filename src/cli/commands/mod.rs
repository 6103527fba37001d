//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod import;
pub mod init;
pub mod validate;
