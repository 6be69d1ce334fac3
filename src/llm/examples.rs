//! One-shot example library loaded from JSON Lines

use serde::Deserialize;
use std::path::Path;

use crate::llm::prompts::ChatMessage;
use crate::{MinutesError, Result};

/// Minimum turns a record needs: system, user, assistant
const MIN_TURNS: usize = 3;

/// Sample input and the minutes written for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptExample {
    pub input: ChatMessage,
    pub output: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ExampleRecord {
    messages: Option<Vec<ChatMessage>>,
}

/// Valid examples plus a warning for every skipped record
#[derive(Debug, Default)]
pub struct ExampleLibrary {
    pub examples: Vec<PromptExample>,
    pub warnings: Vec<String>,
}

impl ExampleLibrary {
    /// Read a library file. Only an unreadable file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MinutesError::Examples(format!(
                "Cannot read example library '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::parse(&content))
    }

    /// Parse library text, skipping malformed records.
    pub fn parse(content: &str) -> Self {
        let mut library = Self::default();

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: ExampleRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    library
                        .warnings
                        .push(format!("JSON decode error at line {}: {}", line_num, e));
                    continue;
                }
            };

            match record.messages {
                Some(mut messages) if messages.len() >= MIN_TURNS => {
                    messages.truncate(MIN_TURNS);
                    let output = messages.remove(2);
                    let input = messages.remove(1);
                    library.examples.push(PromptExample { input, output });
                }
                Some(messages) => library.warnings.push(format!(
                    "Invalid example structure at line {}: expected at least {} messages, found {}",
                    line_num,
                    MIN_TURNS,
                    messages.len()
                )),
                None => library.warnings.push(format!(
                    "Invalid example structure at line {}: missing messages",
                    line_num
                )),
            }
        }

        library
    }

    /// Example used for one-shot conditioning: always the first valid record
    pub fn select(&self) -> Option<&PromptExample> {
        self.examples.first()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompts::Role;

    fn record(user: &str, assistant: &str) -> String {
        serde_json::json!({
            "messages": [
                {"role": "system", "content": "You write minutes."},
                {"role": "user", "content": user},
                {"role": "assistant", "content": assistant},
            ]
        })
        .to_string()
    }

    #[test]
    fn malformed_entries_do_not_stop_loading() {
        let content = [
            r#"{"conversation": []}"#.to_string(),
            "{not json".to_string(),
            String::new(),
            r#"{"messages": [{"role": "system", "content": "only one"}]}"#.to_string(),
            record("first input", "first minutes"),
            record("second input", "second minutes"),
        ]
        .join("\n");

        let library = ExampleLibrary::parse(&content);

        assert_eq!(library.len(), 2);
        assert_eq!(library.warnings.len(), 3);
        assert!(library.warnings[0].contains("line 1"));
        assert!(library.warnings[0].contains("missing messages"));
        assert!(library.warnings[1].contains("JSON decode error at line 2"));
        assert!(library.warnings[2].contains("line 4"));
    }

    #[test]
    fn first_valid_example_is_selected() {
        let content = format!(
            "{}\n{}",
            record("first input", "first minutes"),
            record("second input", "second minutes")
        );
        let library = ExampleLibrary::parse(&content);

        let selected = library.select().unwrap();
        assert_eq!(selected.input.role, Role::User);
        assert_eq!(selected.input.content, "first input");
        assert_eq!(selected.output.role, Role::Assistant);
        assert_eq!(selected.output.content, "first minutes");
    }

    #[test]
    fn empty_library_selects_nothing() {
        let library = ExampleLibrary::parse("\n\n");
        assert!(library.is_empty());
        assert!(library.select().is_none());
        assert!(library.warnings.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = ExampleLibrary::load(Path::new("/no/such/example.jsonl")).unwrap_err();
        assert!(matches!(err, MinutesError::Examples(_)));
    }
}
