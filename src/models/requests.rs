use serde::{Deserialize, Serialize};

/// One prior turn sent to the backend for conversational context.
/// References are stripped; the backend only sees role and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Reply tone requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Neutral,
    Formal,
}

impl Tone {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "friendly" => Some(Tone::Friendly),
            "neutral" => Some(Tone::Neutral),
            "formal" => Some(Tone::Formal),
            _ => None,
        }
    }
}

/// Reply depth requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl Depth {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "short" => Some(Depth::Short),
            "medium" => Some(Depth::Medium),
            "detailed" => Some(Depth::Detailed),
            _ => None,
        }
    }
}

/// Per-request answer preferences, mirroring the backend's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub tone: Tone,
    pub depth: Depth,
    pub use_ucd_sources: bool,
    pub show_references: bool,
    pub model: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            depth: Depth::default(),
            use_ucd_sources: true,
            show_references: true,
            model: "hf:mistralai/Mistral-7B-Instruct".to_string(),
        }
    }
}

/// Chat API request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_serialize_with_backend_field_names() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(json["tone"], "friendly");
        assert_eq!(json["depth"], "medium");
        assert_eq!(json["use_ucd_sources"], true);
        assert_eq!(json["show_references"], true);
    }

    #[test]
    fn empty_history_is_omitted_from_the_request() {
        let request = ChatRequest {
            message: "hi".to_string(),
            session_id: "s-1".to_string(),
            conversation_history: Vec::new(),
            preferences: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("conversation_history"));
        assert!(!json.contains("preferences"));
    }
}
