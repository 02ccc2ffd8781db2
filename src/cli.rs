use clap::Parser;

/// CLI arguments for egghead
#[derive(Parser)]
#[command(name = "egghead")]
#[command(about = "Egghead.AI - UC Davis campus assistant in your terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Base URL of the chat backend (e.g., http://127.0.0.1:8000)
    #[arg(long, value_name = "URL", env = "EGGHEAD_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Conversation archive path
    #[arg(long, value_name = "PATH", env = "EGGHEAD_ARCHIVE")]
    pub archive: Option<String>,

    /// Reply tone: friendly, neutral, or formal
    #[arg(long, value_name = "TONE")]
    pub tone: Option<String>,

    /// Reply depth: short, medium, or detailed
    #[arg(long, value_name = "DEPTH")]
    pub depth: Option<String>,

    /// Override the backend model
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Ask the backend to skip campus resource references
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_references: bool,

    /// Send a single message, print the reply, and exit
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Show request/response summaries
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}
