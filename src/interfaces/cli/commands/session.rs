//! login / logout / whoami commands

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::ClientContext;
use crate::services::LoginClient;

fn prompt_line(label: &str) -> Result<String, CliError> {
    print!("{}", label);
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::CommandError(format!("Failed to read input: {}", e)))?;
    Ok(line.trim().to_string())
}

fn prompt_password() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::CommandError(
            "No password provided. Use --password or run interactively.".to_string(),
        ));
    }

    print!("Password: ");
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(e.to_string()))?;
    rpassword::read_password()
        .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))
}

pub async fn login(
    ctx: &ClientContext,
    config: &StaticConfig,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let client = LoginClient::from_config(&config.client);
    let response = client.login(&email, &password).await?;
    ctx.session.save(&response)?;

    println!(
        "{} Logged in as {} <{}>",
        "✓".bold().green(),
        response.user.name.cyan(),
        response.user.email
    );
    Ok(())
}

pub fn logout(ctx: &ClientContext) -> Result<(), CliError> {
    ctx.session.logout()?;
    println!("{} Logged out", "✓".bold().green());
    Ok(())
}

pub fn whoami(ctx: &ClientContext) -> Result<(), CliError> {
    ctx.session.require_token()?;
    match ctx.session.user()? {
        Some(user) => println!(
            "{} <{}> (id {})",
            user.name.cyan(),
            user.email,
            user.id
        ),
        None => println!("{} Logged in (no profile stored)", "ℹ".bold().blue()),
    }
    Ok(())
}
