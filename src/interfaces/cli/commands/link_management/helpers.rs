//! Shared helpers for link commands

use colored::Colorize;

use crate::app::AppContext;
use crate::errors::TinylinkError;
use crate::interfaces::cli::CliError;
use crate::session::RouteDecision;

/// Run the route guard before a protected command
///
/// An expired token is cleared by the guard; the command then fails with the
/// usual "not logged in" error.
pub(super) fn require_session(ctx: &AppContext) -> Result<(), CliError> {
    match ctx.session.guard() {
        RouteDecision::Allow => Ok(()),
        RouteDecision::RedirectToLogin => {
            ctx.dashboard.reset();
            Err(TinylinkError::unauthenticated().into())
        }
    }
}

/// Pull any create/update published by this process into the dashboard
pub(super) async fn refresh_dashboard(ctx: &AppContext) {
    if ctx.dashboard.sync_pending().await {
        let total = ctx
            .dashboard
            .stats()
            .map(|s| s.total_links)
            .unwrap_or_default();
        println!(
            "{} Dashboard refreshed: {} links",
            "ℹ".bold().blue(),
            total.to_string().green()
        );
    }
}
