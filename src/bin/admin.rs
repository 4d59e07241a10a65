//! CLI administration tool for brief.
//!
//! Manages accounts and inspects the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Lock / unlock an account by id or email
//! cargo run --bin admin -- user lock ada@example.com
//! cargo run --bin admin -- user unlock ada@example.com
//!
//! # Create an administrator (password generated when omitted)
//! cargo run --bin admin -- user create-admin --email ops@example.com
//!
//! # Counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `DB_QUERY_TIMEOUT` (optional): per-query timeout in seconds

use brief::application::services::{AuthService, UserService};
use brief::domain::entities::Account;
use brief::infrastructure::persistence::PgAccountRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// CLI tool for managing brief.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show account and link counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,

    /// Lock an account
    Lock {
        /// Account id or email
        id_or_email: String,
    },

    /// Unlock an account
    Unlock {
        /// Account id or email
        id_or_email: String,
    },

    /// Create an administrator account
    CreateAdmin {
        /// Admin email
        #[arg(short, long)]
        email: Option<String>,

        /// Admin password (generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds a user service over the Postgres repository.
///
/// Tokens are never issued from the CLI, so a missing `SECRET_KEY` is
/// replaced by a throwaway key.
fn user_service(pool: &PgPool) -> UserService {
    let query_timeout = std::env::var("DB_QUERY_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60));

    let repo = Arc::new(PgAccountRepository::new(
        Arc::new(pool.clone()),
        query_timeout,
    ));
    let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| generate_password(48));

    UserService::new(repo, Arc::new(AuthService::new(&secret)))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::List => list_users(&service).await?,
        UserAction::Lock { id_or_email } => lock_user(&service, &id_or_email).await?,
        UserAction::Unlock { id_or_email } => unlock_user(&service, &id_or_email).await?,
        UserAction::CreateAdmin {
            email,
            password,
            yes,
        } => create_admin(&service, email, password, yes).await?,
    }

    Ok(())
}

/// Lists accounts with role and lock status.
///
/// # Output Format
///
/// ```text
/// Accounts
///
///   Email                          Role   Created            Status
///   ──────────────────────────────────────────────────────────────────
///   admin@brief.local              admin  2024-01-15 10:30   ACTIVE
///   ada@example.com                user   2024-01-16 14:20   LOCKED
/// ```
async fn list_users(service: &UserService) -> Result<()> {
    println!("{}", "Accounts".bright_blue().bold());
    println!();

    let accounts = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<36} {:<30} {:<6} {:<17} {:<6}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(100).bright_black());

    for account in &accounts {
        print_account_row(account);
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_account_row(account: &Account) {
    let status = if account.is_locked {
        "LOCKED".red()
    } else {
        "ACTIVE".green()
    };

    println!(
        "  {:<36} {:<30} {:<6} {:<17} {}",
        account.id.to_string().bright_black(),
        account.email.cyan(),
        account.role.as_str(),
        account
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        status
    );
}

/// Locks an account after confirmation (default: No).
async fn lock_user(service: &UserService, id_or_email: &str) -> Result<()> {
    println!("{}", "Lock account".bright_blue().bold());
    println!();

    let account = service
        .get(id_or_email)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if account.is_locked {
        println!("{}", "This account is already locked".yellow());
        return Ok(());
    }

    println!("  Email: {}", account.email.cyan());
    println!("  ID:    {}", account.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Lock this account?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    service
        .lock(id_or_email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to lock account: {}", e))?;

    println!("{}", "Account locked".green().bold());
    Ok(())
}

async fn unlock_user(service: &UserService, id_or_email: &str) -> Result<()> {
    let account = service
        .unlock(id_or_email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to unlock account: {}", e))?;

    println!(
        "{} {}",
        "Account unlocked:".green().bold(),
        account.email.cyan()
    );
    Ok(())
}

/// Creates an administrator with interactive prompts.
///
/// The password is shown once; only its argon2 hash is stored.
async fn create_admin(
    service: &UserService,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create administrator".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Admin email")
            .with_initial_text("admin@brief.local")
            .interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => {
            let generated = generate_password(20);
            println!("{}", "Generated new password".green());
            generated
        }
    };

    let id = Uuid::new_v4();

    println!();
    println!("  ID:       {}", id.to_string().bright_black());
    println!("  Email:    {}", email.cyan());
    println!("  Password: {}", password.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "Save this password now, it cannot be shown again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this administrator?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .create_admin(id, email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create administrator: {}", e))?;

    println!("{}", "Administrator created".green().bold());
    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let locked_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_locked")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await?;

    println!("  Accounts: {}", users_count.to_string().bright_green().bold());
    println!("  Locked:   {}", locked_count.to_string().bright_green().bold());
    println!("  Links:    {}", links_count.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random alphanumeric password of `len` characters.
fn generate_password(len: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
