//! # Session
//!
//! Interactive session state: the single generated-content slot and the
//! submission flow around it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

pub mod state;

pub use state::{
    GeneratedContent, QuestView, Session, SessionState, Submission, MISSING_KEY_WARNING,
};
