//! LLM module for board-minutes
//!
//! Builds the one-shot conversation and sends it to a chat-completion
//! provider (OpenAI-compatible or Gemini).

mod client;
mod examples;
mod gemini;
mod openai;
mod prompts;

pub use client::{build_provider, CompletionError, CompletionProvider, CompletionRequest};
pub use examples::{ExampleLibrary, PromptExample};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use prompts::{
    build_conversation, build_task_prompt, ChatMessage, Conversation, Role, SYSTEM_INSTRUCTION,
};
