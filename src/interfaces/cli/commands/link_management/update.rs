//! Update link command

use colored::Colorize;

use super::helpers::{refresh_dashboard, require_session};
use crate::app::AppContext;
use crate::interfaces::cli::CliError;
use crate::models::LinkDraft;

pub async fn update_link(
    ctx: &AppContext,
    id: &str,
    long_url: String,
    short_code: Option<String>,
    title: Option<String>,
) -> Result<(), CliError> {
    require_session(ctx)?;

    // 未指定的字段沿用当前值
    let current = ctx.links.get_one(id).await?;
    let mut draft = match current {
        Some(link) => {
            let mut draft = link.to_draft();
            draft.long_url = long_url.trim().to_string();
            draft
        }
        None => LinkDraft::new(long_url),
    };
    if let Some(code) = short_code {
        draft = draft.with_short_code(code);
    }
    if let Some(title) = title {
        draft = draft.with_title(title);
    }

    let link = ctx.links.update(id, draft).await?;
    println!(
        "{} Short link updated: {} -> {}",
        "✓".bold().green(),
        link.short_code.as_deref().unwrap_or(id).cyan(),
        link.long_url.blue().underline()
    );

    refresh_dashboard(ctx).await;
    Ok(())
}
