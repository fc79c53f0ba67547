//! CLI interface module
//!
//! Every command maps onto a [`LookupController`](crate::controller::LookupController)
//! operation or a session/database action.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, HistoryCommands};
use crate::config::StaticConfig;
use crate::errors::GeoLookupError;
use crate::runtime::lifetime::startup::ClientContext;
use commands::{
    clear_history, config_generate, list_history, login, logout, lookup, remove_history,
    seed_database, select_history, setup_database, whoami,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    LookupError(String),
    AuthError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::LookupError(msg) => format!("Lookup error: {}", msg),
            CliError::AuthError(msg) => format!("Auth error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::LookupError(msg) => {
                format!("{} {}", "Lookup error:".yellow().bold(), msg.white())
            }
            CliError::AuthError(msg) => {
                format!("{} {}", "Auth error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<GeoLookupError> for CliError {
    fn from(err: GeoLookupError) -> Self {
        match err {
            GeoLookupError::Validation(_)
            | GeoLookupError::Transport(_)
            | GeoLookupError::NoLocation(_) => CliError::LookupError(err.message().to_string()),
            GeoLookupError::Authentication(_) | GeoLookupError::Unauthenticated(_) => {
                CliError::AuthError(err.message().to_string())
            }
            GeoLookupError::StorageParse(_)
            | GeoLookupError::FileOperation(_)
            | GeoLookupError::Serialization(_)
            | GeoLookupError::DatabaseConfig(_)
            | GeoLookupError::DatabaseConnection(_)
            | GeoLookupError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            GeoLookupError::Config(_) | GeoLookupError::NotFound(_) => {
                CliError::CommandError(err.message().to_string())
            }
        }
    }
}

fn open_client(config: &StaticConfig) -> Result<ClientContext, CliError> {
    ClientContext::open(config).map_err(|e| CliError::StorageError(format!("{:#}", e)))
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::SetupDb => setup_database(config).await,
        Commands::Seed => seed_database(config).await,
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Login { email, password } => {
            login(&open_client(config)?, config, email, password).await
        }
        Commands::Logout => logout(&open_client(config)?),
        Commands::Whoami => whoami(&open_client(config)?),

        Commands::Lookup { ip } => lookup(&open_client(config)?, ip).await,
        Commands::History { action } => {
            let ctx = open_client(config)?;
            match action {
                HistoryCommands::List => list_history(&ctx),
                HistoryCommands::Select { ip } => select_history(&ctx, ip).await,
                HistoryCommands::Remove { ips } => remove_history(&ctx, ips),
                HistoryCommands::Clear { yes } => clear_history(&ctx, yes),
            }
        }

        Commands::Serve => unreachable!("server mode handled in main"),
        #[cfg(feature = "tui")]
        Commands::Tui => unreachable!("TUI handled in main"),
    }
}
