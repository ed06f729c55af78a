//! NailAide application binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing
//! 3. Open the user-context store (SQLite, or in-memory)
//! 4. Build the knowledge store and chat orchestrator
//! 5. Answer one `--message`, or run an interactive prompt until `exit`

mod cli;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use nailaide_chat::{ChatError, ChatOrchestrator, ChatReply, ReplyAction};
use nailaide_core::config::NailAideConfig;
use nailaide_knowledge::KnowledgeStore;
use nailaide_storage::{Database, KeyValueStore, MemoryStore};

use cli::CliArgs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = NailAideConfig::load_or_default(&config_file);
    config.chat.rng_seed = args.resolve_seed(config.chat.rng_seed);

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting NailAide v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    // Storage.
    let store: Arc<dyn KeyValueStore> = if args.in_memory {
        tracing::info!("Using in-memory user context store");
        Arc::new(MemoryStore::new())
    } else {
        let data_dir = args.resolve_data_dir(&config.general.data_dir);
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
            return Err(e.into());
        }
        let db_path = data_dir.join("nailaide.db");
        Arc::new(Database::new(&db_path)?)
    };

    // Chat.
    let knowledge = Arc::new(KnowledgeStore::new().with_business(&config.business));
    let mut chat = ChatOrchestrator::new(&config, knowledge, store);

    if let Some(message) = args.message.as_deref() {
        let result = chat.handle_message(message);
        chat.persist();
        return match result {
            Ok(reply) => {
                print_reply(&reply);
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    run_repl(&mut chat)?;
    chat.persist();
    tracing::info!("NailAide shut down");
    Ok(())
}

/// Read messages line by line until `exit`, `quit`, or end of input.
fn run_repl(chat: &mut ChatOrchestrator) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "NailAide: {}", chat.greeting())?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match chat.handle_message(line) {
            Ok(reply) => print_reply(&reply),
            Err(ChatError::EmptyMessage) => continue,
            Err(e) => writeln!(stdout, "NailAide: Sorry, {}.", e)?,
        }
    }
    Ok(())
}

fn print_reply(reply: &ChatReply) {
    println!("NailAide: {}", reply.text);
    match &reply.action {
        Some(ReplyAction::Book { url }) => println!("  [book] {}", url),
        Some(ReplyAction::Navigate { page, url }) => println!("  [{}] {}", page.label(), url),
        None => {}
    }
}
