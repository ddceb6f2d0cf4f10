//! # Feature: Course Generation
//!
//! One chat completion per submitted quest, with failures reported as values.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Added `GenerationFailure` classification and redacted `ApiKey`
//! - 1.0.0: Initial release

pub mod client;
pub mod credential;
pub mod error;

pub use client::{
    CompletionBackend, GenerationClient, GenerationSettings, OpenAiBackend, DEFAULT_BASE_URL,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use credential::ApiKey;
pub use error::GenerationFailure;
