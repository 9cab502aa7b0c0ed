//! Login, logout and session status

use chrono::Utc;
use colored::Colorize;

use crate::app::AppContext;
use crate::interfaces::cli::CliError;
use crate::session::RouteDecision;
use crate::utils::time_ago;

pub fn login(ctx: &AppContext, token: &str) -> Result<(), CliError> {
    ctx.session.login(token)?;

    println!("{} Logged in", "✓".bold().green());
    if !ctx.session.is_valid() {
        println!(
            "{} The token is already expired; protected commands will log you out",
            "⚠".bold().yellow()
        );
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<(), CliError> {
    ctx.logout();
    println!("{} Logged out", "✓".bold().green());
    Ok(())
}

/// Print the session state; an expired token is cleared by the guard
pub fn session_status(ctx: &AppContext) -> Result<(), CliError> {
    println!("{}", "Session Status".bold().green());
    println!("  {}:   {}", "Backend".cyan(), ctx.base_url());
    println!("  {}:     {}", "Theme".cyan(), ctx.theme.current());

    let had_token = ctx.session.is_authenticated();
    match ctx.session.guard() {
        RouteDecision::Allow => {
            println!("  {}:     {}", "State".cyan(), "logged in".green());
            if let Some(user) = ctx.session.user() {
                if let Some(name) = user.name {
                    println!("  {}:      {}", "Name".cyan(), name);
                }
                if let Some(email) = user.email {
                    println!("  {}:     {}", "Email".cyan(), email);
                }
                if let Some(id) = user.id {
                    println!("  {}:   {}", "User id".cyan(), id.dimmed());
                }
            }
            if let Some(expires_at) = ctx.session.expires_at() {
                println!(
                    "  {}:   {} {}",
                    "Expires".cyan(),
                    expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    format!("({})", remaining(expires_at)).dimmed()
                );
            }
        }
        decision => {
            let state = if had_token {
                "token expired, logged out".yellow()
            } else {
                "not logged in".yellow()
            };
            println!("  {}:     {}", "State".cyan(), state);
            if let Some(target) = decision.redirect_target() {
                println!(
                    "{} Sign in at {}{} and run {}",
                    "ℹ".bold().blue(),
                    ctx.base_url(),
                    target,
                    "tinylink login <TOKEN>".cyan()
                );
            }
        }
    }
    Ok(())
}

fn remaining(expires_at: chrono::DateTime<Utc>) -> String {
    // time_ago 以 “now - then” 计算，这里反过来得到剩余时间
    match time_ago(Utc::now(), expires_at).strip_suffix(" ago") {
        Some(span) => format!("in {}", span),
        None => "in less than a minute".to_string(),
    }
}
