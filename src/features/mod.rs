//! Feature modules

pub mod generation;
pub mod quest;

pub use generation::{ApiKey, GenerationClient, GenerationFailure, GenerationSettings};
pub use quest::{build_prompt, CourseRequest, PromptBuilder, PromptPair};
