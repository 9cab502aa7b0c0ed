//! Show one link with its monthly click chart

use colored::Colorize;

use super::helpers::require_session;
use crate::app::AppContext;
use crate::dashboard::ChartScale;
use crate::interfaces::cli::CliError;
use crate::models::ShortLink;
use crate::utils::format_date;

/// Width of a full-height bar in characters
const BAR_WIDTH: usize = 30;

pub async fn show_link(ctx: &AppContext, id: &str) -> Result<(), CliError> {
    require_session(ctx)?;

    let Some(link) = ctx.links.get_one(id).await? else {
        return Err(CliError::CommandError(format!(
            "Short link does not exist: {}",
            id
        )));
    };

    print_link(ctx, &link);
    Ok(())
}

fn print_link(ctx: &AppContext, link: &ShortLink) {
    let title = link.title.as_deref().unwrap_or(crate::models::UNTITLED);
    println!("{}", title.bold().green());

    if let Some(code) = link.short_code.as_deref() {
        println!("  {}:  {}", "Short URL".cyan(), ctx.short_url(code).blue().underline());
    }
    println!("  {}: {}", "Destination".cyan(), link.long_url.blue().underline());
    println!("  {}:     {}", "Clicks".cyan(), link.clicks);
    println!(
        "  {}: {}",
        "Last click".cyan(),
        format_date(link.last_clicked_at.as_deref())
    );

    if link.monthly_clicks.is_empty() {
        println!();
        println!("{} No monthly click data yet", "ℹ".bold().blue());
        return;
    }

    let scale = ChartScale::from_months(&link.monthly_clicks);
    println!();
    println!(
        "{} {}",
        "Monthly clicks".bold(),
        format!("(scale 0-{}, ticks {:?})", scale.ceiling, scale.ticks).dimmed()
    );
    for bar in &scale.bars {
        let width = (bar.height_pct / 100.0 * BAR_WIDTH as f64).round() as usize;
        println!(
            "  {:>4} {} {}",
            bar.month,
            "█".repeat(width).green(),
            bar.clicks.to_string().dimmed()
        );
    }
}
