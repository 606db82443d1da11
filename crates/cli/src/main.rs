//! Market CLI - seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Fill a running server with demo categories and products
//! market-cli seed --username admin --password <password>
//!
//! # Against a non-default gateway
//! market-cli seed --base-url http://localhost:8080 --username admin --password <password>
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "market-cli")]
#[command(author, version, about = "Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a running server with demo catalog data
    Seed {
        /// Gateway base URL
        #[arg(long, default_value = "http://localhost:5000")]
        base_url: String,
        /// Username to log in with
        #[arg(long)]
        username: String,
        /// Password to log in with
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "market_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed {
            base_url,
            username,
            password,
        } => commands::seed::run(&base_url, &username, &password).await,
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "Command failed");
        std::process::exit(1);
    }
}
