//! CLI command implementations

mod config_gen;
mod database;
mod history;
mod lookup;
mod session;

pub use config_gen::config_generate;
pub use database::{seed_database, setup_database};
pub use history::{clear_history, list_history, remove_history, select_history};
pub use lookup::{lookup, print_geo_result};
pub use session::{login, logout, whoami};

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use super::CliError;

/// 交互确认，非 TTY 时视为拒绝
pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    print!("{} {}", prompt.yellow(), "[y/N] ".yellow());
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CliError::CommandError(format!("Failed to read input: {}", e)))?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
