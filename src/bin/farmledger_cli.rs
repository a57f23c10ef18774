//! Operator command-line tool: schema setup and account creation.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use farmledger_api as api;

#[derive(Parser)]
#[command(name = "farmledger", about = "FarmLedger administration commands")]
struct Cli {
    /// Database URL; falls back to the configured APP__DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or upgrade the database schema.
    InitDb,
    /// Create an operator account for the web login.
    CreateAdmin { username: String, password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(cfg.log_level());

    let database_url = cli.database_url.unwrap_or_else(|| cfg.database_url.clone());
    let db = api::db::establish_connection(&database_url)
        .await
        .context("failed to connect to the database")?;

    match cli.command {
        Command::InitDb => {
            api::db::run_migrations(&db)
                .await
                .context("failed to run migrations")?;
            println!("Database schema is up to date.");
        }
        Command::CreateAdmin { username, password } => {
            let users = api::services::users::UserService::new(Arc::new(db));
            let account = users
                .create_user(username.trim(), &password)
                .await
                .context("failed to create account")?;
            println!("Created account '{}'.", account.username);
        }
    }

    Ok(())
}
