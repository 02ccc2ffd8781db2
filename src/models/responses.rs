use serde::Deserialize;

use super::types::Reference;

/// Shown when the backend answers 2xx but carries no reply text under
/// either accepted field name.
pub const MISSING_REPLY_FALLBACK: &str = "No reply returned.";

/// Chat API response body.
///
/// Older backend builds answer under `response`, newer ones under `reply`;
/// both stay accepted, with `response` taking precedence. Every field is
/// individually defaulted so a sparse body still parses.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub used_model: Option<String>,
    #[serde(default)]
    pub safety: Option<serde_json::Value>,
}

impl ChatResponse {
    /// Normalized reply text across backend versions.
    pub fn reply_text(&self) -> String {
        self.response
            .as_deref()
            .or(self.reply.as_deref())
            .unwrap_or(MISSING_REPLY_FALLBACK)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_field_wins_over_reply() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"response": "new", "reply": "old"}"#).unwrap();
        assert_eq!(parsed.reply_text(), "new");
    }

    #[test]
    fn reply_only_body_is_used_verbatim() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"reply": "The library is open 8am-10pm."}"#).unwrap();
        assert_eq!(parsed.reply_text(), "The library is open 8am-10pm.");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.reply_text(), MISSING_REPLY_FALLBACK);
        assert!(parsed.references.is_empty());
        assert!(parsed.session_id.is_none());
    }

    #[test]
    fn references_parse_with_wire_field_names() {
        let body = r#"{
            "reply": "ok",
            "references": [{"title": "ASUCD Pantry", "type": "ucd_resource", "id": "asucd_pantry"}],
            "used_model": "hf:mistralai/Mistral-7B-Instruct",
            "safety": {"category": "none"}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.references.len(), 1);
        assert_eq!(parsed.references[0].kind, "ucd_resource");
        assert_eq!(parsed.used_model.as_deref(), Some("hf:mistralai/Mistral-7B-Instruct"));
        assert!(parsed.safety.is_some());
    }
}
