//! # Core Module
//!
//! Configuration and output helpers shared by the binary and the features.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with copy-ready Markdown blocks
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{copy_block, fence_for};
