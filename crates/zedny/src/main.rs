// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zedny - role-based client portal.
//!
//! This is the binary entry point: a chat REPL for clients and a live
//! ticket dashboard for staff, both backed by the classification service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod dashboard;
mod session;
mod shell;
mod shutdown;
mod users;

use clap::{Parser, Subcommand};
use colored::Colorize;
use zedny_config::model::ZednyConfig;
use zedny_core::ZednyError;
use zedny_core::types::UserRole;

use crate::session::PortalSession;

/// Zedny - role-based client portal.
#[derive(Parser, Debug)]
#[command(name = "zedny", version, about, long_about = None)]
struct Cli {
    /// Act as the demo user for this role (client, employee, admin).
    #[arg(long, global = true, default_value = "client")]
    role: UserRole,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the assistant in an interactive REPL.
    Chat,
    /// Watch the live ticket dashboard.
    Dashboard {
        /// Poll once, print, and exit.
        #[arg(long)]
        once: bool,
        /// Print each view as a JSON line.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match zedny_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            zedny_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.portal.log_level);

    let result = match cli.command {
        Some(Commands::Config) => print_config(&config),
        Some(command) => run_portal_command(config, cli.role, command).await,
        None => {
            println!("zedny: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Builds the portal session, runs one command against it, and tears it down.
async fn run_portal_command(
    config: ZednyConfig,
    role: UserRole,
    command: Commands,
) -> Result<(), ZednyError> {
    let cancel = shutdown::install_signal_handler();
    let portal = PortalSession::new(config, users::demo_user(role), cancel)?;
    let result = match command {
        Commands::Chat => shell::run_chat(&portal).await,
        Commands::Dashboard { once, json } => {
            dashboard::run_dashboard(&portal, once, json).await
        }
        Commands::Config => print_config(portal.config()),
    };
    portal.shutdown().await;
    result
}

fn print_config(config: &ZednyConfig) -> Result<(), ZednyError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ZednyError::Internal(format!("failed to render config: {e}")))?;
    println!("{rendered}");
    println!("# resolved backend base URL: {}", config.backend.resolved_base_url());
    Ok(())
}

/// Initialize tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zedny={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
