//! Wire models for the link API
//!
//! Field names follow the backend's camelCase JSON. Everything the backend
//! owns is defaulted on read so that a sparse payload still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FormField, Result, TinylinkError};
use crate::utils::lenient;
use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Title shown for links created without one
pub const UNTITLED: &str = "Untitled";

/// A short link as returned by the detail, create and update endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawShortLink")]
pub struct ShortLink {
    pub id: String,
    pub long_url: String,
    pub short_code: Option<String>,
    pub title: Option<String>,
    pub clicks: u64,
    /// ISO-8601 timestamp; absent means never clicked
    pub last_clicked_at: Option<String>,
    pub monthly_clicks: Vec<MonthlyClicks>,
}

/// Mongo 文档可能同时带 `_id` 和 `id`，两者都读，`id` 优先
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShortLink {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "lenient::opt_string")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    long_url: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    short_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    clicks: u64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    last_clicked_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    monthly_clicks: Vec<MonthlyClicks>,
}

impl From<RawShortLink> for ShortLink {
    fn from(raw: RawShortLink) -> Self {
        Self {
            id: raw.id.or(raw.mongo_id).unwrap_or_default(),
            long_url: raw.long_url,
            short_code: raw.short_code,
            title: raw.title,
            clicks: raw.clicks,
            last_clicked_at: raw.last_clicked_at,
            monthly_clicks: raw.monthly_clicks,
        }
    }
}

impl ShortLink {
    /// 完整短链接：`{base_url}/{short_code}`
    pub fn short_url(&self, base_url: &str) -> Option<String> {
        self.short_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|code| format!("{}/{}", base_url.trim_end_matches('/'), code))
    }

    pub fn last_clicked(&self) -> Option<DateTime<Utc>> {
        self.last_clicked_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn to_draft(&self) -> LinkDraft {
        LinkDraft {
            long_url: self.long_url.clone(),
            short_code: self.short_code.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyClicks {
    #[serde(default, deserialize_with = "lenient::string")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
}

/// A row of the dashboard list (`GET /shortlink/my-links`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLinkSummary")]
pub struct LinkSummary {
    pub id: String,
    pub title: Option<String>,
    /// Short URL without scheme, e.g. `tinyl.ink/home`
    pub short: String,
    /// Destination URL
    pub long: String,
    pub clicks: u64,
    pub last_clicked: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkSummary {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "lenient::opt_string")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    short: String,
    #[serde(default, deserialize_with = "lenient::string")]
    long: String,
    #[serde(default, deserialize_with = "lenient::count")]
    clicks: u64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    last_clicked: Option<String>,
}

impl From<RawLinkSummary> for LinkSummary {
    fn from(raw: RawLinkSummary) -> Self {
        Self {
            id: raw.id.or(raw.mongo_id).unwrap_or_default(),
            title: raw.title,
            short: raw.short,
            long: raw.long,
            clicks: raw.clicks,
            last_clicked: raw.last_clicked,
        }
    }
}

impl LinkSummary {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// The short code is the last path segment of `short`
    pub fn short_code(&self) -> &str {
        self.short.rsplit('/').next().unwrap_or_default()
    }

    /// Pre-fill an edit form from a dashboard row
    pub fn to_draft(&self) -> LinkDraft {
        LinkDraft::new(self.long.clone())
            .with_short_code(self.short_code())
            .with_title(self.title.clone().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_links: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_clicks: u64,
    /// Short URL of the most clicked link
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub popular: Option<String>,
    /// Most recent click across all links
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub activity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardPayload {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub stats: DashboardStats,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub links: Vec<LinkSummary>,
}

/// Body of a create or update request
///
/// Empty short codes and titles are sent as `null` so the backend can assign
/// its own code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDraft {
    pub long_url: String,
    pub short_code: Option<String>,
    pub title: Option<String>,
}

impl LinkDraft {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into().trim().to_string(),
            short_code: None,
            title: None,
        }
    }

    pub fn with_short_code(mut self, code: impl Into<String>) -> Self {
        self.short_code = non_empty(code.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// What the backend is assumed to hold after accepting this draft
    pub fn into_link(self, id: impl Into<String>) -> ShortLink {
        ShortLink {
            id: id.into(),
            long_url: self.long_url,
            short_code: self.short_code,
            title: self.title,
            ..Default::default()
        }
    }

    /// Local checks run before any request is made
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.long_url).map_err(|e| {
            let message = match e {
                UrlValidationError::EmptyUrl => "Destination URL is required.",
                _ => "Enter a valid URL.",
            };
            TinylinkError::validation(FormField::LongUrl, message)
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DeleteReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Whatever `POST /qr/generate` returns; the shape is owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrArtifact(pub serde_json::Value);

impl QrArtifact {
    /// The first string field that looks like an image payload or link
    pub fn image(&self) -> Option<&str> {
        ["qrCode", "qr", "image", "url", "data"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(serde_json::Value::as_str))
    }
}
