//! Mode routing
//!
//! This module provides unified entry points for different execution modes:
//! - Server mode (HTTP server, default)
//! - CLI mode (one-shot commands)
//! - TUI mode (interactive terminal UI)

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

#[cfg(feature = "tui")]
pub use tui::run_tui;

use crate::cli::{Cli, Commands};

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    #[cfg(feature = "tui")]
    Tui,
    Unknown,
}

/// Detect which mode to run from parsed arguments
///
/// 无子命令或 `serve` 时启动服务器
pub fn detect_mode(cli: &Cli) -> Mode {
    match &cli.command {
        #[cfg(feature = "tui")]
        Some(Commands::Tui) => Mode::Tui,

        #[cfg(feature = "server")]
        None | Some(Commands::Serve) => Mode::Server,

        #[cfg(feature = "cli")]
        Some(_) => Mode::Cli,

        #[allow(unreachable_patterns)]
        _ => Mode::Unknown,
    }
}
