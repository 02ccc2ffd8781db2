use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::BackendGateway;
use crate::chat::{group_by_age, ChatSession, ConversationStore, SendOutcome};
use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::logging::ConversationLogger;
use crate::models::{Conversation, Message};
use crate::render::convert_emoticons;

/// Run the client: one-shot `--message` mode, or the interactive REPL.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = ClientConfig::from_cli(cli);
    let store = ConversationStore::load(&config.archive_path);
    let gateway = BackendGateway::new(&config);
    let mut session = ChatSession::new(store, gateway, config.preferences.clone());

    session.logger = match ConversationLogger::new(&config.data_dir).await {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    if let Some(message) = &cli.message {
        match session.send(message).await {
            SendOutcome::Sent { conversation_id } => print_last_reply(&session, &conversation_id),
            SendOutcome::Skipped => eprintln!("{} Nothing to send", "⚠️".yellow()),
        }
        return Ok(());
    }

    print_banner(&config, &session);

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                if line == "/help" {
                    print_help();
                    continue;
                }
                if line == "/new" {
                    session.store.set_active(None);
                    println!("{} Started a new chat", "✨".bright_yellow());
                    continue;
                }
                if line == "/list" {
                    print_conversation_list(&session.store);
                    continue;
                }
                if let Some(arg) = line.strip_prefix("/open ") {
                    open_conversation(&mut session, arg.trim());
                    continue;
                }
                if let Some(arg) = line.strip_prefix("/delete ") {
                    delete_conversation(&mut session, arg.trim());
                    continue;
                }
                if line.starts_with('/') {
                    eprintln!("{} Unknown command: {} (try /help)", "❌".bright_red(), line);
                    continue;
                }

                println!("{}", "Egghead is thinking...".bright_black());
                if let SendOutcome::Sent { conversation_id } = session.send(line).await {
                    print_last_reply(&session, &conversation_id);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn print_banner(config: &ClientConfig, session: &ChatSession) {
    println!("{}", "🥚 Egghead.AI - Your UC Davis campus assistant".bright_yellow().bold());
    println!("{}", format!("Backend: {}", config.backend_url).bright_black());
    if let Some(logger) = &session.logger {
        println!("{}", format!("Logging to {}", logger.path().display()).bright_black());
    }
    println!("{}", "Type 'exit' or 'quit' to leave, or /help for commands\n".bright_black());
}

fn print_help() {
    println!("{} Commands:", "💡".bright_cyan());
    println!("  /new            - Start a new chat (next message opens a conversation)");
    println!("  /list           - List saved conversations grouped by age");
    println!("  /open <n>       - Reopen conversation <n> from the list");
    println!("  /delete <n>     - Delete conversation <n> from the list");
    println!("  /help           - Show this help");
    println!("  exit, quit      - Leave");
}

fn print_conversation_list(store: &ConversationStore) {
    if store.is_empty() {
        println!("{} No saved conversations yet", "ℹ️".bright_blue());
        return;
    }

    // The store is newest-created-first, so walking the buckets in display
    // order keeps the numbering aligned with store order.
    let groups = group_by_age(store.conversations(), Local::now());
    let mut index = 1;
    for (label, bucket) in groups.sections() {
        if bucket.is_empty() {
            continue;
        }
        println!("{}", label.bright_black());
        for conversation in bucket {
            let marker = if store.active_id() == Some(conversation.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                " {}{:>2}. {} {}",
                marker,
                index,
                conversation.title,
                format!("({} messages)", conversation.messages.len()).bright_black()
            );
            index += 1;
        }
    }
}

/// Resolve a 1-based listing number to a conversation id.
fn resolve_id(store: &ConversationStore, arg: &str) -> Option<String> {
    let index: usize = arg.parse().ok()?;
    store
        .conversations()
        .get(index.checked_sub(1)?)
        .map(|c| c.id.clone())
}

fn open_conversation(session: &mut ChatSession, arg: &str) {
    let Some(id) = resolve_id(&session.store, arg) else {
        eprintln!("{} No conversation '{}' (see /list)", "❌".bright_red(), arg);
        return;
    };
    session.store.set_active(Some(id));
    if let Some(conversation) = session.store.active_conversation() {
        print_transcript(conversation);
    }
}

fn delete_conversation(session: &mut ChatSession, arg: &str) {
    let Some(id) = resolve_id(&session.store, arg) else {
        eprintln!("{} No conversation '{}' (see /list)", "❌".bright_red(), arg);
        return;
    };
    let title = session
        .store
        .get(&id)
        .map(|c| c.title.clone())
        .unwrap_or_default();
    session.store.delete_conversation(&id);
    println!("{} Deleted \"{}\"", "🗑️".bright_red(), title);
}

fn print_transcript(conversation: &Conversation) {
    println!("{}", conversation.title.bright_yellow().bold());
    for message in &conversation.messages {
        if message.role == "user" {
            println!("{} {}", "You:".bright_green().bold(), message.content);
        } else {
            print_assistant_message(message);
        }
    }
}

fn print_last_reply(session: &ChatSession, conversation_id: &str) {
    if let Some(message) = session
        .store
        .get(conversation_id)
        .and_then(|c| c.messages.last())
    {
        print_assistant_message(message);
    }
}

fn print_assistant_message(message: &Message) {
    println!(
        "{} {}",
        "Egghead:".bright_yellow().bold(),
        convert_emoticons(&message.content)
    );
    if !message.references.is_empty() {
        println!("{}", "📚 UC Davis Resources:".yellow());
        for reference in &message.references {
            println!("  • {}", reference.title);
        }
    }
}
