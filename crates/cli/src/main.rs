//! Rolodex CLI - Account management and data inspection.
//!
//! # Usage
//!
//! ```bash
//! # Create a user account
//! rdx user create -u alice -p sekret123
//!
//! # List accounts with contact counts
//! rdx user list
//! ```
//!
//! # Commands
//!
//! - `user create` - Create an account and seed its starter categories
//! - `user list` - List accounts and their contact counts
//!
//! The data directory comes from `ROLODEX_DATA_DIR` (default: `data`),
//! matching the web server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rdx")]
#[command(author, version, about = "Rolodex CLI tools")]
struct Cli {
    /// Data directory (overrides ROLODEX_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        /// Username (will be capitalized, like all stored names)
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List accounts and their contact counts
    List,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), commands::user::UserCmdError> {
    let data_dir = cli.data_dir.as_deref();
    match &cli.command {
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(data_dir, username, password)?;
            }
            UserAction::List => commands::user::list(data_dir)?,
        },
    }
    Ok(())
}
