// Core layer - configuration and output helpers
pub mod core;

// Features layer - quest prompts and course generation
pub mod features;

// Session state for the interactive loop
pub mod session;

// Terminal form and rendering
pub mod ui;

pub use crate::core::Config;

pub use crate::features::{
    build_prompt, ApiKey, CourseRequest, GenerationClient, GenerationFailure, GenerationSettings,
    PromptBuilder, PromptPair,
};

pub use crate::session::{GeneratedContent, QuestView, Session, SessionState, Submission};
