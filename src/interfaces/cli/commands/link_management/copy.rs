//! Copy command

use colored::Colorize;

use crate::app::AppContext;
use crate::interfaces::cli::CliError;

pub fn copy_text(ctx: &AppContext, text: &str) -> Result<(), CliError> {
    ctx.dashboard.copy(text)?;
    println!("{} Copied: {}", "✓".bold().green(), text.cyan());
    Ok(())
}
