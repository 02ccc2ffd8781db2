use anyhow::Result;
use clap::Parser;

mod api;
mod app;
mod chat;
mod cli;
mod config;
mod logging;
mod models;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    app::run(&cli).await
}
