//! Generative model access for mood analysis.
//!
//! The analyzer only needs a single-prompt completion, so the abstraction is a
//! narrow [`CompletionProvider`] trait with a Groq implementation.

mod groq;
mod provider;

pub use groq::GroqClient;
pub use provider::{CompletionOptions, CompletionProvider, LlmError};
