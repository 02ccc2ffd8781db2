use serde::{Deserialize, Serialize};

/// Maximum number of characters kept when deriving a conversation title.
pub const TITLE_MAX_CHARS: usize = 50;

/// A citation attached to an assistant message, pointing at a campus resource.
/// Opaque to the client beyond display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// A single chat message. Immutable once appended to a conversation;
/// `references` is only ever populated on assistant messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            references: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, references: Vec<Reference>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            references,
        }
    }
}

/// A saved conversation thread. `id` and `timestamp` are fixed at creation;
/// `messages` is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Conversation {
    pub fn new(id: String, first_message: &str, timestamp: i64) -> Self {
        Self {
            id,
            title: derive_title(first_message),
            messages: Vec::new(),
            timestamp,
        }
    }
}

/// Derive a conversation title from the first user message: the first
/// 50 characters, with "..." appended iff the text was longer.
/// Truncation counts chars, not bytes, so multibyte input cannot panic.
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= TITLE_MAX_CHARS {
        return trimmed.to_string();
    }
    let truncated: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_title_kept_verbatim() {
        assert_eq!(derive_title("What are the library hours?"), "What are the library hours?");
    }

    #[test]
    fn long_title_truncated_with_ellipsis() {
        let text = "a".repeat(60);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn exactly_fifty_chars_gets_no_ellipsis() {
        let text = "b".repeat(TITLE_MAX_CHARS);
        assert_eq!(derive_title(&text), text);
    }

    #[test]
    fn multibyte_title_truncates_on_char_boundary() {
        let text = "🥚".repeat(60);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }

    #[test]
    fn message_roundtrips_without_empty_references() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(!json.contains("references"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.role, "user");
        assert!(parsed.references.is_empty());
    }
}
