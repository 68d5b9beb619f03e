//! Vila CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the migration list
//! vila-cli migrate
//!
//! # Create an admin account
//! vila-cli admin create -e admin@example.com -n "Admin Name" -p <password>
//!
//! # Seed the database with demo content
//! vila-cli seed
//!
//! # Diagnose connectivity and migration state
//! vila-cli check
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vila-cli")]
#[command(author, version, about = "Vila CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations in order
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with demo content for local development
    Seed,
    /// Check database connectivity and migration state
    Check,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account with an active admin profile
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create_admin(&email, &name, &password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
