//! Theme command

use std::str::FromStr;

use colored::Colorize;

use crate::app::AppContext;
use crate::cli::ThemeCommands;
use crate::interfaces::cli::CliError;
use crate::theme::Theme;

pub fn run_theme_command(ctx: &AppContext, action: Option<ThemeCommands>) -> Result<(), CliError> {
    match action.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => {
            println!("{} Theme: {}", "ℹ".bold().blue(), ctx.theme.current().to_string().cyan());
        }
        ThemeCommands::Toggle => {
            let theme = ctx.theme.toggle()?;
            println!("{} Theme switched to {}", "✓".bold().green(), theme.to_string().cyan());
        }
        ThemeCommands::Set { theme } => {
            let theme = Theme::from_str(&theme).map_err(|_| {
                CliError::ParseError(format!("Unknown theme '{}', expected light or dark", theme))
            })?;
            ctx.theme.set(theme)?;
            println!("{} Theme set to {}", "✓".bold().green(), theme.to_string().cyan());
        }
    }
    Ok(())
}
