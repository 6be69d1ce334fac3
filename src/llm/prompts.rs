//! Conversation assembly for minutes generation

use serde::{Deserialize, Serialize};

use crate::llm::examples::PromptExample;

/// Fixed instruction describing the minutes-writing task.
pub const SYSTEM_INSTRUCTION: &str = "You write structured minutes for public agency board meetings. \
Given a meeting agenda and a meeting transcript, produce concise, professional minutes that \
follow the order and headings of the agenda and summarize each discussion in your own words \
without quoting speakers. Give particular attention to formal board actions: motions that were \
made, seconded and voted on under Robert's Rules of Order, including the outcome. \
Match the style, formatting and conventions of any example you are shown.";

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Ordered turns sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Text of the system turn, if any
    pub fn system(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// Every turn except the system instruction
    pub fn turns(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    /// Whether a worked example precedes the real request
    pub fn is_one_shot(&self) -> bool {
        self.turns().count() > 1
    }
}

/// Final user turn carrying the meeting inputs
pub fn build_task_prompt(agenda: &str, transcript: &str) -> String {
    format!(
        "Please create meeting minutes based on this agenda and transcript.\n\
\n\
AGENDA:\n\
{agenda}\n\
\n\
TRANSCRIPT:\n\
{transcript}"
    )
}

/// Build the system turn, the optional example exchange and the task turn.
pub fn build_conversation(
    agenda: &str,
    transcript: &str,
    example: Option<&PromptExample>,
) -> Conversation {
    let mut messages = vec![ChatMessage::new(Role::System, SYSTEM_INSTRUCTION)];

    if let Some(example) = example {
        messages.push(example.input.clone());
        messages.push(example.output.clone());
    }

    messages.push(ChatMessage::new(
        Role::User,
        build_task_prompt(agenda, transcript),
    ));

    Conversation { messages }
}
