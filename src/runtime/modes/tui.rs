//! TUI mode
//!
//! Opens the client context and delegates to the terminal UI.

use anyhow::{Context, Result};

use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::ClientContext;

/// Run TUI mode
pub async fn run_tui(config: &StaticConfig) -> Result<()> {
    let ctx = ClientContext::open(config).context("Failed to open client storage")?;
    crate::interfaces::tui::run_tui(ctx).await
}
