// Models module - data structures for the conversation store and the backend wire contract
pub mod requests;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use requests::{ChatRequest, Depth, HistoryEntry, Preferences, Tone};
pub use responses::ChatResponse;
pub use types::{derive_title, Conversation, Message, Reference};
