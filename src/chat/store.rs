use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use colored::Colorize;

use crate::config::expand_tilde;
use crate::models::{Conversation, Message};

/// Owns the saved conversations and the currently selected conversation id,
/// mirrored to a single JSON file on every mutation.
///
/// Persistence is best-effort: a missing or malformed archive loads as an
/// empty store, and a failed write is reported on stderr and otherwise
/// ignored. All mutations happen on the single runtime thread, so there is
/// no locking here.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    archive_path: PathBuf,
}

impl ConversationStore {
    /// Load the archive at `path`, or start empty when it is missing or
    /// unreadable. Never returns an error to the caller.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let archive_path = expand_tilde(path.as_ref());

        let conversations = match fs::read_to_string(&archive_path) {
            Ok(json) => match serde_json::from_str::<Vec<Conversation>>(&json) {
                Ok(conversations) => conversations,
                Err(e) => {
                    eprintln!(
                        "{} Conversation archive {} is unreadable ({}), starting fresh",
                        "⚠️".yellow(),
                        archive_path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            conversations,
            active_id: None,
            archive_path,
        }
    }

    /// Write the full conversation list through to disk. Failures are
    /// non-fatal: there is no durability guarantee beyond best effort.
    pub fn save(&self) {
        if let Some(parent) = self.archive_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let json = match serde_json::to_string_pretty(&self.conversations) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("{} Failed to serialize conversations: {}", "⚠️".yellow(), e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.archive_path, json) {
            eprintln!(
                "{} Failed to write {}: {}",
                "⚠️".yellow(),
                self.archive_path.display(),
                e
            );
        }
    }

    /// Create a conversation titled after `first_message`, prepend it, and
    /// return its id. Ids come from the creation timestamp and are bumped
    /// until unique within the store.
    pub fn create_conversation(&mut self, first_message: &str) -> String {
        let timestamp = Utc::now().timestamp_millis();
        let mut candidate = timestamp;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        let id = candidate.to_string();

        self.conversations
            .insert(0, Conversation::new(id.clone(), first_message, timestamp));
        self.save();
        id
    }

    /// Append a message to the matching conversation. Unknown ids are a
    /// no-op.
    pub fn append_message(&mut self, conversation_id: &str, message: Message) {
        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        else {
            return;
        };
        conversation.messages.push(message);
        self.save();
    }

    /// Remove a conversation; clears the active id if it pointed at it.
    pub fn delete_conversation(&mut self, conversation_id: &str) {
        self.conversations.retain(|c| c.id != conversation_id);
        if self.active_id.as_deref() == Some(conversation_id) {
            self.active_id = None;
        }
        self.save();
    }

    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    /// All conversations, newest-created-first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn set_active(&mut self, conversation_id: Option<String>) {
        self.active_id = conversation_id;
    }

    /// The active conversation, if the stored id still resolves. A dangling
    /// id reads as "no active conversation".
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref().filter(|id| self.get(id).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
