//! # Terminal UI
//!
//! Form prompts, Markdown preview and the terminal view for the session.

pub mod form;
pub mod markdown;
pub mod terminal;

pub use form::NextAction;
pub use terminal::{TerminalView, GENERATING_MESSAGE};
