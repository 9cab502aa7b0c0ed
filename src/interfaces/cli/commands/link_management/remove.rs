//! Delete link command

use colored::Colorize;

use super::helpers::require_session;
use crate::app::AppContext;
use crate::interfaces::cli::CliError;

pub async fn delete_link(ctx: &AppContext, id: &str) -> Result<(), CliError> {
    require_session(ctx)?;

    ctx.dashboard.delete(id).await?;
    println!("{} Deleted short link: {}", "✓".bold().green(), id.cyan());
    Ok(())
}
