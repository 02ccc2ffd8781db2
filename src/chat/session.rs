use uuid::Uuid;

use crate::api::BackendGateway;
use crate::chat::store::ConversationStore;
use crate::logging::ConversationLogger;
use crate::models::{ChatRequest, HistoryEntry, Message, Preferences};

/// What a `send` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty or another send was in flight; nothing changed.
    Skipped,
    /// One user and one assistant message were appended to the conversation.
    Sent { conversation_id: String },
}

/// Orchestrates a chat turn: optimistic user append, backend call,
/// assistant (or recovered error) append.
///
/// Every failure past input validation degrades into an assistant message,
/// so `send` itself never errors and the conversation stays usable.
pub struct ChatSession {
    pub store: ConversationStore,
    pub gateway: BackendGateway,
    pub preferences: Preferences,
    pub session_id: String,
    pub loading: bool,
    pub logger: Option<ConversationLogger>,
}

impl ChatSession {
    pub fn new(store: ConversationStore, gateway: BackendGateway, preferences: Preferences) -> Self {
        Self {
            store,
            gateway,
            preferences,
            session_id: Uuid::new_v4().to_string(),
            loading: false,
            logger: None,
        }
    }

    /// Send one user message to the active conversation, creating it first
    /// if none is selected.
    pub async fn send(&mut self, input: &str) -> SendOutcome {
        let trimmed = input.trim();
        // One request in flight per session; re-entry while loading is ignored.
        if trimmed.is_empty() || self.loading {
            return SendOutcome::Skipped;
        }

        let conversation_id = match self.store.active_id() {
            Some(id) => id.to_string(),
            None => {
                let id = self.store.create_conversation(trimmed);
                self.store.set_active(Some(id.clone()));
                id
            }
        };

        // History covers the turns before this send; the new text travels in
        // the `message` field. References never leave the client.
        let conversation_history: Vec<HistoryEntry> = self
            .store
            .get(&conversation_id)
            .map(|conversation| {
                conversation
                    .messages
                    .iter()
                    .map(|m| HistoryEntry {
                        role: m.role.clone(),
                        content: m.content.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        self.store
            .append_message(&conversation_id, Message::user(trimmed));
        if let Some(logger) = &mut self.logger {
            logger.log("user", trimmed, &[]).await;
        }

        let request = ChatRequest {
            message: trimmed.to_string(),
            session_id: self.session_id.clone(),
            conversation_history,
            preferences: Some(self.preferences.clone()),
        };

        self.loading = true;
        let assistant = match self.gateway.call(&request).await {
            Ok(reply) => Message::assistant(reply.text, reply.references),
            Err(e) => Message::assistant(format!("Error: {}", e), Vec::new()),
        };

        if let Some(logger) = &mut self.logger {
            logger
                .log("assistant", &assistant.content, &assistant.references)
                .await;
        }
        self.store.append_message(&conversation_id, assistant);
        self.loading = false;

        SendOutcome::Sent { conversation_id }
    }
}
