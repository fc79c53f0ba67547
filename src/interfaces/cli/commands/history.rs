//! history commands

use std::collections::HashSet;

use colored::Colorize;

use super::confirm;
use super::lookup::report_outcome;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::ClientContext;

pub fn list_history(ctx: &ClientContext) -> Result<(), CliError> {
    ctx.session.require_token()?;
    let history = ctx.controller.load_history();

    if history.is_empty() {
        println!("{} No search history", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Search history:".bold().green());
    for (index, entry) in history.iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            index + 1,
            entry.ip.cyan(),
            entry
                .timestamp
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .dimmed()
        );
    }
    Ok(())
}

pub async fn select_history(ctx: &ClientContext, ip: String) -> Result<(), CliError> {
    ctx.session.require_token()?;
    let history = ctx.controller.load_history();
    if !history.contains(&ip) {
        return Err(CliError::CommandError(format!(
            "{} is not in the search history",
            ip
        )));
    }

    let outcome = ctx.controller.select_history(&ip).await;
    report_outcome(&ctx.controller, outcome)
}

pub fn remove_history(ctx: &ClientContext, ips: Vec<String>) -> Result<(), CliError> {
    ctx.session.require_token()?;
    let controller = &ctx.controller;
    let before = controller.load_history();

    let targets: HashSet<String> = ips.into_iter().collect();
    let missing: Vec<&String> = targets.iter().filter(|ip| !before.contains(ip)).collect();
    for ip in &missing {
        println!("{} {} is not in the search history", "ℹ".bold().blue(), ip);
    }

    for ip in &targets {
        controller.toggle_selection(ip);
    }
    let after = controller.delete_selected()?;

    println!(
        "{} Removed {} entries, {} remaining",
        "✓".bold().green(),
        before.len() - after.len(),
        after.len()
    );
    Ok(())
}

pub fn clear_history(ctx: &ClientContext, yes: bool) -> Result<(), CliError> {
    ctx.session.require_token()?;
    let controller = &ctx.controller;
    let history = controller.load_history();

    if !yes && !confirm(&format!("Clear all {} history entries?", history.len()))? {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    controller.clear_history()?;
    println!("{} Search history cleared", "✓".bold().green());
    Ok(())
}
