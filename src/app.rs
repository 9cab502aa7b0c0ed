//! Provider composition
//!
//! Session → link registry → dashboard, plus the theme. Each container gets
//! its collaborators through its constructor; nothing here is global.

use std::sync::Arc;

use crate::clipboard::{ClipboardSink, default_clipboard};
use crate::config::StaticConfig;
use crate::dashboard::DashboardState;
use crate::errors::Result;
use crate::links::LinkRegistry;
use crate::session::SessionState;
use crate::storage::{FileStore, PersistentStore};
use crate::theme::ThemeState;
use crate::transport::{HttpTransport, UreqTransport};

pub struct AppContext {
    pub session: Arc<SessionState>,
    pub links: Arc<LinkRegistry>,
    pub dashboard: Arc<DashboardState>,
    pub theme: Arc<ThemeState>,
    base_url: String,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn PersistentStore>,
        transport: Arc<dyn HttpTransport>,
        clipboard: Arc<dyn ClipboardSink>,
        base_url: impl Into<String>,
    ) -> Self {
        let session = Arc::new(SessionState::new(store.clone()));
        let links = Arc::new(LinkRegistry::new(session.clone(), transport));
        let dashboard = Arc::new(DashboardState::new(
            session.clone(),
            links.clone(),
            clipboard,
        ));
        let theme = Arc::new(ThemeState::new(store));

        Self {
            session,
            links,
            dashboard,
            theme,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Wire the real file store, HTTP transport and clipboard from config
    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        let store = Arc::new(FileStore::open(&config.storage.path)?);
        let transport = Arc::new(UreqTransport::new(&config.api));
        Ok(Self::new(
            store,
            transport,
            default_clipboard(),
            config.api.base(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{code}`
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Log out and forget the previous session's dashboard
    pub fn logout(&self) {
        self.session.logout();
        self.dashboard.reset();
    }
}
