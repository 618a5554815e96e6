// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fieldport - customer booking portal backed by ServiceM8.
//!
//! This is the binary entry point for the portal server.

use clap::{Parser, Subcommand};

mod serve;

/// Fieldport - customer booking portal backed by ServiceM8.
#[derive(Parser, Debug)]
#[command(name = "fieldport", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the portal HTTP server.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match fieldport_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            fieldport_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(err) = serve::run_serve(config).await {
                eprintln!("fieldport: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => {
                    print!("{rendered}");
                    println!("\n# mode: {}", config.mode());
                }
                Err(err) => {
                    eprintln!("fieldport: failed to render config: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
