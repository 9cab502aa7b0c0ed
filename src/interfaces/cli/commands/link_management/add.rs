//! Create link command

use colored::Colorize;

use super::helpers::{refresh_dashboard, require_session};
use crate::app::AppContext;
use crate::interfaces::cli::CliError;
use crate::models::LinkDraft;
use crate::utils::generate_short_code;

pub async fn create_link(
    ctx: &AppContext,
    long_url: String,
    short_code: Option<String>,
    title: Option<String>,
    generate: bool,
) -> Result<(), CliError> {
    require_session(ctx)?;

    let mut draft = LinkDraft::new(long_url);
    if generate {
        let code = generate_short_code();
        println!("{} Generated random code: {}", "ℹ".bold().blue(), code.magenta());
        draft = draft.with_short_code(code);
    } else if let Some(code) = short_code {
        draft = draft.with_short_code(code);
    }
    if let Some(title) = title {
        draft = draft.with_title(title);
    }

    let link = ctx.links.create(draft).await?;

    let short = link
        .short_code
        .as_deref()
        .map(|code| ctx.short_url(code))
        .unwrap_or_else(|| "(pending)".to_string());
    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        short.cyan(),
        link.long_url.blue().underline()
    );

    refresh_dashboard(ctx).await;
    Ok(())
}
