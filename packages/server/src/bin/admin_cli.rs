//! CLI for managing blog admin accounts
//!
//! `hash-password` prints an argon2 PHC string; `create-admin` upserts an
//! account directly in the configured database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mindbridge_core::domains::auth::activities::normalize_email;
use mindbridge_core::domains::auth::hash_password;
use mindbridge_core::kernel::postgres::PgAccountStore;
use mindbridge_core::kernel::BaseAccountStore;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "admin_cli")]
#[command(about = "Blog admin account management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for manual inserts
    HashPassword { password: String },

    /// Create an admin account, or reset its password if it exists
    CreateAdmin {
        email: String,
        password: String,
        #[arg(long)]
        display_name: Option<String>,
        /// Postgres URL (defaults to DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
        }
        Commands::CreateAdmin {
            email,
            password,
            display_name,
            database_url,
        } => {
            let database_url = match database_url {
                Some(url) => url,
                None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            };
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&database_url)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            let email = normalize_email(&email);
            let display_name = display_name
                .unwrap_or_else(|| email.split('@').next().unwrap_or("admin").to_string());

            let account = PgAccountStore::new(pool)
                .upsert(&email, &display_name, &hash_password(&password)?)
                .await?;

            println!("Admin ready: {} ({})", account.email, account.id);
        }
    }

    Ok(())
}
