//! Placeholder dashboard shown when the backend cannot be reached

use crate::models::{DashboardPayload, DashboardStats, LinkSummary};

pub fn fallback_stats() -> DashboardStats {
    DashboardStats {
        total_links: 5,
        total_clicks: 1784,
        popular: Some("tinyl.ink/home".to_string()),
        activity: Some("Just now".to_string()),
    }
}

pub fn fallback_links() -> Vec<LinkSummary> {
    vec![
        LinkSummary {
            id: "1".to_string(),
            title: Some("Home".to_string()),
            short: "tinyl.ink/home".to_string(),
            long: "https://example.com/home".to_string(),
            clicks: 245,
            last_clicked: Some("2024-01-10 10:21".to_string()),
        },
        LinkSummary {
            id: "2".to_string(),
            title: Some("About Page".to_string()),
            short: "tinyl.ink/about".to_string(),
            long: "https://example.com/about".to_string(),
            clicks: 187,
            last_clicked: Some("2024-01-09 14:50".to_string()),
        },
    ]
}

pub fn fallback_payload() -> DashboardPayload {
    DashboardPayload {
        stats: fallback_stats(),
        links: fallback_links(),
    }
}
