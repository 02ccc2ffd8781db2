use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::models::Reference;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO-8601 UTC
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<&'a [Reference]>,
}

/// Appends every chat turn to a JSONL file under `<data dir>/logs/`.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; the file name comes from the current UTC time.
    pub async fn new(data_dir: &Path) -> Result<Self> {
        let logs_dir = data_dir.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let now: DateTime<Utc> = Utc::now();
        let filename = format!("egghead-{}.jsonl", now.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    /// Append a single entry. Write failures are reported and dropped.
    pub async fn log(&mut self, role: &str, content: &str, references: &[Reference]) {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            role,
            content,
            references: if references.is_empty() {
                None
            } else {
                Some(references)
            },
        };
        if let Some(file) = &mut self.file {
            if let Ok(json) = serde_json::to_string(&entry) {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}
