// Main entry point - Dependency injection and the interactive loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::history_store::HistoryStore;
use crate::application::session::CalculatorSession;
use crate::infrastructure::config::load_storage_config;
use crate::infrastructure::file_repository::FileHistoryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{handle_line, LoopControl};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let storage_config = load_storage_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FileHistoryRepository::new(
        storage_config.storage.history_file,
    ));

    // Create the store and session (application layer)
    let mut history = HistoryStore::new(repository);
    history.load().await;

    let mut state = AppState {
        session: CalculatorSession::new(),
        history,
    };

    // Drive the command loop (presentation layer)
    println!("LED strip planner - type 'help' for commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let LoopControl::Quit = handle_line(&mut state, &line).await {
            break;
        }
    }

    Ok(())
}
