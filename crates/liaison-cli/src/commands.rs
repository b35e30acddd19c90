//! Non-interactive subcommand execution.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use liaison_models::{DiscussionTopic, RankedItem, VendorId};
use liaison_persistence::{AgendaStore, PersistenceError};
use liaison_queue::render_snapshot;
use liaison_ranking::{RankingAssembler, RankingError};

use crate::cli::Commands;

/// Errors surfaced by CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Ranking error.
    #[error("ranking error: {0}")]
    Ranking(#[from] RankingError),

    /// Queue error from an interactive session.
    #[error("queue error: {0}")]
    Queue(#[from] liaison_queue::QueueError),

    /// Readline error from the REPL.
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for CLI command execution.
pub type Result<T> = std::result::Result<T, CliError>;

/// Executes a non-interactive subcommand.
pub fn execute(cmd: Commands, state_dir: &Path) -> Result<()> {
    let store = AgendaStore::new(state_dir);

    match cmd {
        Commands::Agenda { vendor, limit } => {
            let vendor = VendorId::from(vendor);
            let agenda =
                RankingAssembler::new(&store).ranked_agenda(&vendor, limit as usize)?;
            print_agenda(&vendor, &agenda);
            Ok(())
        }

        Commands::Export { vendor, limit } => {
            let vendor = VendorId::from(vendor);
            let agenda =
                RankingAssembler::new(&store).ranked_agenda(&vendor, limit as usize)?;
            println!("{}", render_snapshot(&agenda));
            Ok(())
        }

        Commands::Add {
            vendor,
            title,
            context,
            ask,
        } => {
            let mut builder = DiscussionTopic::builder(vendor, title);
            if let Some(context) = context {
                builder = builder.context(context);
            }
            if let Some(ask) = ask {
                builder = builder.ask(ask);
            }
            let topic = builder.build();
            store.topics.save(&topic)?;

            info!(vendor = %topic.vendor_id, topic = %topic.id, "discussion topic created");
            println!("Added topic {} ({})", topic.id, topic.title);
            Ok(())
        }

        // Handled by main before reaching here.
        Commands::Repl { .. } => Ok(()),
    }
}

/// Prints one vendor's ranked agenda.
pub fn print_agenda(vendor: &VendorId, agenda: &[RankedItem]) {
    if agenda.is_empty() {
        println!("No open items for {}.", vendor);
        return;
    }

    println!("Agenda for {} ({} items)", vendor, agenda.len());
    println!();
    println!(
        "{:>4}  {:>5}  {:<8}  {:<11}  {:>4}  TITLE",
        "RANK", "SCORE", "PRIORITY", "TYPE", "AGE"
    );
    for entry in agenda {
        let item = &entry.item;
        println!(
            "{:>4}  {:>5.0}  {:<8}  {:<11}  {:>3}d  {}",
            entry.rank,
            entry.score,
            item.priority.as_str(),
            item.kind.as_str(),
            item.age_days,
            item.title
        );
    }
}
