//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for council
//! conversations.

mod repl;

pub use repl::ChatRepl;
