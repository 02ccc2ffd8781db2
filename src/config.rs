use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::Cli;
use crate::models::{Depth, Preferences, Tone};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ARCHIVE_PATH: &str = "~/.egghead/conversations.json";

/// Configuration for the egghead client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the chat backend
    pub backend_url: String,
    /// Conversation archive location (may start with ~)
    pub archive_path: String,
    /// Directory that receives conversation logs
    pub data_dir: PathBuf,
    /// Answer preferences forwarded with every request
    pub preferences: Preferences,
    /// Print request/response summaries
    pub verbose: bool,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let backend_url = cli
            .backend_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let archive_path = cli
            .archive
            .clone()
            .unwrap_or_else(|| DEFAULT_ARCHIVE_PATH.to_string());
        let data_dir = expand_tilde(Path::new(&archive_path))
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut preferences = Preferences::default();
        if let Some(tone) = cli.tone.as_deref() {
            match Tone::from_name(tone) {
                Some(tone) => preferences.tone = tone,
                None => eprintln!(
                    "{} Unknown tone '{}', using the default",
                    "⚠️".yellow(),
                    tone
                ),
            }
        }
        if let Some(depth) = cli.depth.as_deref() {
            match Depth::from_name(depth) {
                Some(depth) => preferences.depth = depth,
                None => eprintln!(
                    "{} Unknown depth '{}', using the default",
                    "⚠️".yellow(),
                    depth
                ),
            }
        }
        if let Some(model) = &cli.model {
            preferences.model = model.clone();
        }
        if cli.no_references {
            preferences.show_references = false;
        }

        Self {
            backend_url,
            archive_path,
            data_dir,
            preferences,
            verbose: cli.verbose,
        }
    }
}

/// Ensure the configured backend URL points at the chat endpoint.
pub fn normalize_chat_url(url: &str) -> String {
    // A URL that already names the endpoint is used as-is
    if url.contains("/chat") {
        return url.to_string();
    }

    if url.ends_with('/') {
        format!("{}chat", url)
    } else {
        format!("{}/chat", url)
    }
}

/// Expand a leading ~ to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn bare_base_url_gets_the_chat_path() {
        assert_eq!(normalize_chat_url("http://127.0.0.1:8000"), "http://127.0.0.1:8000/chat");
        assert_eq!(normalize_chat_url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000/chat");
    }

    #[test]
    fn explicit_chat_url_is_kept_as_is() {
        assert_eq!(
            normalize_chat_url("https://api.egghead.example/v2/chat"),
            "https://api.egghead.example/v2/chat"
        );
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let cli = Cli::try_parse_from(["egghead"]).unwrap();
        let config = ClientConfig::from_cli(&cli);

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.archive_path, DEFAULT_ARCHIVE_PATH);
        assert_eq!(config.preferences.tone, Tone::Friendly);
        assert!(config.preferences.show_references);
    }

    #[test]
    fn preference_flags_override_the_defaults() {
        let cli = Cli::try_parse_from([
            "egghead",
            "--tone",
            "formal",
            "--depth",
            "short",
            "--model",
            "gpt-4o-mini",
            "--no-references",
        ])
        .unwrap();
        let config = ClientConfig::from_cli(&cli);

        assert_eq!(config.preferences.tone, Tone::Formal);
        assert_eq!(config.preferences.depth, Depth::Short);
        assert_eq!(config.preferences.model, "gpt-4o-mini");
        assert!(!config.preferences.show_references);
    }

    #[test]
    fn unknown_tone_falls_back_to_the_default() {
        let cli = Cli::try_parse_from(["egghead", "--tone", "sarcastic"]).unwrap();
        let config = ClientConfig::from_cli(&cli);
        assert_eq!(config.preferences.tone, Tone::Friendly);
    }
}
