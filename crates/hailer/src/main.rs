// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hailer - a conversational ride-booking assistant.
//!
//! This is the binary entry point for the Hailer service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use clap::{Parser, Subcommand};

/// Hailer - a conversational ride-booking assistant.
#[derive(Parser, Debug)]
#[command(name = "hailer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Hailer turn server.
    Serve,
    /// Manage Hailer configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match hailer_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hailer_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(error) = serve::run_serve(config).await {
                eprintln!("hailer serve: {error}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(error) => {
                eprintln!("hailer config show: {error}");
                std::process::exit(1);
            }
        },
        None => {
            println!("hailer: use --help for available commands");
        }
    }
}
