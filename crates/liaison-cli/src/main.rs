//! Liaison CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use liaison_cli::cli::{Cli, Commands};
use liaison_cli::commands;
use liaison_cli::repl::Repl;
use liaison_models::VendorId;

fn main() {
    // Load .env.local if it exists (for LIAISON_STATE_DIR etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let state_dir = cli.state_dir();

    let result = match cli.command {
        Commands::Repl { vendor, limit } => run_repl(&state_dir, vendor, limit as usize),
        cmd => commands::execute(cmd, &state_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_repl(state_dir: &std::path::Path, vendor: String, limit: usize) -> commands::Result<()> {
    let repl = Repl::new(state_dir, VendorId::from(vendor), limit)?;
    repl.run()?;
    Ok(())
}
