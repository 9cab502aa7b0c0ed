//! CLI interface module
//!
//! This module maps clap commands onto the session, link registry and
//! dashboard held by an [`AppContext`].

pub mod commands;

use std::fmt;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::errors::TinylinkError;
use commands::{
    config_generate, copy_text, create_link, create_qr, delete_link, list_links, login, logout,
    run_theme_command, session_status, show_link, update_link,
};

#[derive(Debug)]
pub enum CliError {
    /// Failure reported by the state layer
    Api(TinylinkError),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Api(err) => match err.field() {
                Some(field) => format!("{} ({}): {}", err.error_type(), field, err.message()),
                None => err.format_simple(),
            },
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Api(err) => match err.field() {
                Some(field) => format!(
                    "{} {}\n  {} {}",
                    "[ERROR]".red().bold(),
                    err.error_type().red(),
                    format!("{}:", field).yellow(),
                    err.message().white()
                ),
                None => err.format_colored(),
            },
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
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

impl From<TinylinkError> for CliError {
    fn from(err: TinylinkError) -> Self {
        CliError::Api(err)
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(ctx: &AppContext, cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Login { token } => login(ctx, &token),
        Commands::Logout => logout(ctx),
        Commands::Status => session_status(ctx),
        Commands::List { search } => list_links(ctx, search).await,
        Commands::Show { id } => show_link(ctx, &id).await,
        Commands::Create {
            url,
            code,
            title,
            generate,
        } => create_link(ctx, url, code, title, generate).await,
        Commands::Update {
            id,
            url,
            code,
            title,
        } => update_link(ctx, &id, url, code, title).await,
        Commands::Delete { id } => delete_link(ctx, &id).await,
        Commands::Copy { text } => copy_text(ctx, &text),
        Commands::Qr { url } => create_qr(ctx, &url).await,
        Commands::Theme { action } => run_theme_command(ctx, action),
        Commands::Config { action } => config_generate(action),
    }
}
