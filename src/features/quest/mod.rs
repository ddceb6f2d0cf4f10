//! # Feature: Quest Prompts
//!
//! Course request validation and the SkillQuest prompt templates.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod prompt_builder;
pub mod request;

pub use prompt_builder::{
    build_prompt, Challenge, PromptBuilder, PromptPair, CHALLENGES, CHALLENGES_HEADING,
    HEADING_MARKER, OUTLINE_PLACEHOLDER, SYSTEM_PROMPT,
};
pub use request::{CourseRequest, RequestError};
