//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::UnknownUserPolicy;

/// Login API - username/password login over an argon2 identity store
#[derive(Parser, Debug)]
#[command(name = "login-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage the identity store
    User(UserArgs),
}

/// Arguments for the serve command; unset values come from the environment
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// How unknown usernames are reported (distinct | uniform)
    #[arg(long)]
    pub unknown_user_policy: Option<UnknownUserPolicy>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the user command
#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

/// Identity store actions
#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create a user with a hashed password
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Plaintext password (at least 8 characters)
        #[arg(long, env = "LOGIN_API_PASSWORD", hide_env_values = true)]
        password: String,
    },
}
