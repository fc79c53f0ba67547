//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// geolookup - IP geolocation lookup with persistent search history
#[derive(Parser)]
#[command(name = "geolookup")]
#[command(version)]
#[command(about = "IP geolocation lookup with search history", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Start TUI mode
    #[cfg(feature = "tui")]
    Tui,

    /// Create the users table if it does not exist
    SetupDb,

    /// Insert the test user (test@example.com / password123)
    Seed,

    /// Log in against the server and store the session locally
    Login {
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Look up an address; without an argument looks up your own address
    Lookup {
        /// IPv4 (a.b.c.d) or full 8-group IPv6 address
        ip: Option<String>,
    },

    /// Manage search history
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Search history commands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List history, most recent first
    List,

    /// Look up a history entry again and move it to the front
    Select {
        ip: String,
    },

    /// Remove one or more entries
    Remove {
        #[arg(required = true, num_args = 1..)]
        ips: Vec<String>,
    },

    /// Remove all entries
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
