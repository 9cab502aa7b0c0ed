//! Link registry state
//!
//! CRUD against `/shortlink` with the session's bearer token. Every call
//! short-circuits with the "not logged in" failure before touching the
//! network when no token is held. Successful creates and updates are
//! published on a watch channel that the dashboard uses as a refresh trigger.

mod loading;

pub use loading::{LoadingGuard, LoadingTracker};

use std::sync::Arc;

use serde_json::{Value, json};
use strum::{AsRefStr, Display};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::errors::{FormField, Result, TinylinkError};
use crate::models::{DashboardPayload, DeleteReceipt, LinkDraft, QrArtifact, ShortLink};
use crate::session::SessionState;
use crate::transport::{ApiRequest, HttpTransport};
use crate::utils::url_validator::validate_url;

pub const LINKS_PATH: &str = "/shortlink";
pub const MY_LINKS_PATH: &str = "/shortlink/my-links";
pub const QR_PATH: &str = "/qr/generate";

pub fn link_path(id: &str) -> String {
    format!("{}/{}", LINKS_PATH, urlencoding::encode(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LinkOp {
    Create,
    Update,
    Delete,
    GetOne,
    GetAll,
    CreateQr,
}

/// Published after every successful create or update
///
/// Consumers treat it as a trigger only; `link` is the backend's echo, not
/// the authoritative list.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSignal {
    pub revision: u64,
    pub op: LinkOp,
    pub link: ShortLink,
}

pub struct LinkRegistry {
    session: Arc<SessionState>,
    transport: Arc<dyn HttpTransport>,
    loading: LoadingTracker,
    last_result: watch::Sender<Option<LinkSignal>>,
}

impl LinkRegistry {
    pub fn new(session: Arc<SessionState>, transport: Arc<dyn HttpTransport>) -> Self {
        let (last_result, _) = watch::channel(None);
        Self {
            session,
            transport,
            loading: LoadingTracker::new(),
            last_result,
        }
    }

    pub fn is_loading(&self, op: LinkOp) -> bool {
        self.loading.is_loading(op)
    }

    pub fn is_busy(&self) -> bool {
        self.loading.any()
    }

    pub fn last_result(&self) -> Option<LinkSignal> {
        self.last_result.borrow().clone()
    }

    /// Register for create/update notifications
    pub fn subscribe(&self) -> watch::Receiver<Option<LinkSignal>> {
        self.last_result.subscribe()
    }

    async fn call(&self, op: LinkOp, request: ApiRequest) -> Result<Value> {
        let _loading = self.loading.begin(op);
        debug!("{}: {} {}", op, request.method, request.path);

        let result = match self.transport.send(request).await {
            Ok(resp) => resp.into_result(),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!("{} failed: {}", op, e);
        }
        result
    }

    fn publish(&self, op: LinkOp, link: &ShortLink) {
        self.last_result.send_modify(|last| {
            let revision = last.as_ref().map_or(1, |s| s.revision + 1);
            *last = Some(LinkSignal {
                revision,
                op,
                link: link.clone(),
            });
        });
    }

    /// Create a link; the backend assigns a short code when none is given
    ///
    /// A short-code collision comes back as `TinylinkError::Conflict` on the
    /// short-code field. Any 2xx counts as created, whatever the body holds.
    pub async fn create(&self, draft: LinkDraft) -> Result<ShortLink> {
        let bearer = self.session.bearer()?;
        draft.validate()?;

        let body = serde_json::to_value(&draft)?;
        let value = self
            .call(LinkOp::Create, ApiRequest::post(LINKS_PATH, body).with_bearer(bearer))
            .await?;

        let link = parse_entity(value, move || draft.into_link(""));
        self.publish(LinkOp::Create, &link);
        Ok(link)
    }

    pub async fn update(&self, id: &str, draft: LinkDraft) -> Result<ShortLink> {
        let bearer = self.session.bearer()?;
        draft.validate()?;

        let body = serde_json::to_value(&draft)?;
        let value = self
            .call(LinkOp::Update, ApiRequest::put(link_path(id), body).with_bearer(bearer))
            .await?;

        let mut link = parse_entity(value, move || draft.into_link(id));
        if link.id.is_empty() {
            link.id = id.to_string();
        }
        self.publish(LinkOp::Update, &link);
        Ok(link)
    }

    /// Delete a link
    ///
    /// Callers rendering a list remove the row whatever the outcome.
    pub async fn delete(&self, id: &str) -> Result<DeleteReceipt> {
        let bearer = self.session.bearer()?;
        let value = self
            .call(LinkOp::Delete, ApiRequest::delete(link_path(id)).with_bearer(bearer))
            .await?;

        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Full detail of one link, including `monthlyClicks`
    ///
    /// `Ok(None)` means the backend answered without a payload (not found);
    /// transport and backend failures stay errors.
    pub async fn get_one(&self, id: &str) -> Result<Option<ShortLink>> {
        let bearer = self.session.bearer()?;
        let value = self
            .call(LinkOp::GetOne, ApiRequest::get(link_path(id)).with_bearer(bearer))
            .await?;

        match value.get("data") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data.clone())?)),
        }
    }

    /// Every link owned by the session, with the backend's summary stats
    pub async fn get_all(&self) -> Result<DashboardPayload> {
        let bearer = self.session.bearer()?;
        let value = self
            .call(LinkOp::GetAll, ApiRequest::get(MY_LINKS_PATH).with_bearer(bearer))
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Ask the backend for a QR code pointing at `long_url`
    pub async fn create_qr(&self, long_url: &str) -> Result<QrArtifact> {
        let bearer = self.session.bearer()?;
        let long_url = long_url.trim();
        validate_url(long_url)
            .map_err(|_| TinylinkError::validation(FormField::LongUrl, "Enter a valid URL."))?;

        let value = self
            .call(
                LinkOp::CreateQr,
                ApiRequest::post(QR_PATH, json!({ "longUrl": long_url })).with_bearer(bearer),
            )
            .await?;

        Ok(QrArtifact(value))
    }
}

/// Create/update answer either with the entity or with `{data: entity}`
///
/// 状态码已经是 2xx，body 读不出来时用请求内容兜底，不当作失败。
fn parse_entity(value: Value, fallback: impl FnOnce() -> ShortLink) -> ShortLink {
    let entity = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    if !entity.is_object() {
        debug!("Response carried no link entity, using the request draft");
        return fallback();
    }
    match serde_json::from_value::<ShortLink>(entity) {
        Ok(link) if !link.id.is_empty() || !link.long_url.is_empty() => link,
        Ok(_) => fallback(),
        Err(e) => {
            warn!("Unreadable link entity in a successful response: {}", e);
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_path_encodes_id() {
        assert_eq!(link_path("abc"), "/shortlink/abc");
        assert_eq!(link_path("a b/c"), "/shortlink/a%20b%2Fc");
    }

    #[test]
    fn test_parse_entity_unwraps_data() {
        let wrapped = json!({"message": "ok", "data": {"_id": "1", "longUrl": "https://a.io"}});
        assert_eq!(parse_entity(wrapped, ShortLink::default).id, "1");

        let bare = json!({"id": "2", "longUrl": "https://b.io"});
        assert_eq!(parse_entity(bare, ShortLink::default).id, "2");
    }

    #[test]
    fn test_parse_entity_falls_back_without_body() {
        let draft = LinkDraft::new("https://a.io").with_title("A");
        for body in [Value::Null, json!(""), json!({"data": null}), json!({"message": "Created"})] {
            let link = parse_entity(body, || draft.clone().into_link("x"));
            assert_eq!(link.id, "x");
            assert_eq!(link.long_url, "https://a.io");
            assert_eq!(link.title.as_deref(), Some("A"));
        }
    }

    #[test]
    fn test_op_names() {
        assert_eq!(LinkOp::GetOne.to_string(), "get_one");
        assert_eq!(LinkOp::CreateQr.as_ref(), "create_qr");
    }
}
