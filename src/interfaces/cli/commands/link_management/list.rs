//! List links command

use colored::Colorize;

use super::helpers::require_session;
use crate::app::AppContext;
use crate::interfaces::cli::CliError;
use crate::utils::format_date;

pub async fn list_links(ctx: &AppContext, search: Option<String>) -> Result<(), CliError> {
    require_session(ctx)?;
    ctx.dashboard.fetch().await;

    let snapshot = ctx.dashboard.snapshot();
    if snapshot.from_fallback {
        println!(
            "{} Backend unavailable, showing placeholder data",
            "⚠".bold().yellow()
        );
    }

    if let Some(stats) = &snapshot.stats {
        println!("{}", "Overview".bold().green());
        println!("  {}:  {}", "Total links".cyan(), stats.total_links);
        println!("  {}: {}", "Total clicks".cyan(), stats.total_clicks);
        println!(
            "  {}:      {}",
            "Popular".cyan(),
            stats.popular.as_deref().unwrap_or("-")
        );
        println!(
            "  {}:     {}",
            "Activity".cyan(),
            format_date(stats.activity.as_deref())
        );
        println!();
    }

    let links = match search.as_deref() {
        Some(term) => ctx.dashboard.search(term),
        None => snapshot.links,
    };

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        println!(
            "  {} {} -> {}",
            link.display_title().bold(),
            link.short.cyan(),
            link.long.blue().underline()
        );
        println!(
            "    {}",
            format!(
                "(id: {}, clicks: {}, last clicked: {})",
                link.id,
                link.clicks,
                format_date(link.last_clicked.as_deref())
            )
            .dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
