//! QR code command

use colored::Colorize;

use super::helpers::require_session;
use crate::app::AppContext;
use crate::interfaces::cli::CliError;

pub async fn create_qr(ctx: &AppContext, long_url: &str) -> Result<(), CliError> {
    require_session(ctx)?;

    let artifact = ctx.links.create_qr(long_url).await?;
    println!("{} QR code generated for {}", "✓".bold().green(), long_url.blue().underline());

    match artifact.image() {
        Some(image) => println!("{}", image),
        None => println!(
            "{}",
            serde_json::to_string_pretty(&artifact)
                .map_err(|e| CliError::CommandError(e.to_string()))?
        ),
    }
    Ok(())
}
