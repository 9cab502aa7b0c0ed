//! Dashboard aggregation state
//!
//! Holds the authoritative list of the session's links and the summary stats.
//! It never splices mutation results into its list: every create/update
//! signal from the [`LinkRegistry`] causes a full re-fetch.
//!
//! Failure policy: any fetch failure swaps in the fixed placeholder dataset
//! (see [`fallback`]) instead of surfacing an error.

pub mod chart;
pub mod fallback;
pub mod search;

pub use chart::{ChartBar, ChartScale, chart_ceiling, y_axis_ticks};
pub use fallback::{fallback_links, fallback_payload, fallback_stats};
pub use search::{filter_links, matches_search};

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardSink;
use crate::errors::Result;
use crate::links::{LinkRegistry, LinkSignal};
use crate::models::{DashboardStats, LinkSummary};
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub phase: DashboardPhase,
    pub stats: Option<DashboardStats>,
    pub links: Vec<LinkSummary>,
    /// The current data is the placeholder dataset
    pub from_fallback: bool,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            phase: DashboardPhase::Loading,
            stats: None,
            links: Vec::new(),
            from_fallback: false,
        }
    }
}

pub struct DashboardState {
    session: Arc<SessionState>,
    registry: Arc<LinkRegistry>,
    clipboard: Arc<dyn ClipboardSink>,
    snapshot: RwLock<DashboardSnapshot>,
    link_signal: Mutex<watch::Receiver<Option<LinkSignal>>>,
}

impl DashboardState {
    pub fn new(
        session: Arc<SessionState>,
        registry: Arc<LinkRegistry>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        let link_signal = Mutex::new(registry.subscribe());
        Self {
            session,
            registry,
            clipboard,
            snapshot: RwLock::new(DashboardSnapshot::default()),
            link_signal,
        }
    }

    /// Load stats and links from the backend
    ///
    /// Without a session this does nothing: existing data is kept and no
    /// request is made.
    pub async fn fetch(&self) {
        if !self.session.is_authenticated() {
            debug!("Dashboard fetch skipped: not logged in");
            return;
        }

        self.snapshot.write().phase = DashboardPhase::Loading;

        let (payload, from_fallback) = match self.registry.get_all().await {
            Ok(payload) => (payload, false),
            Err(e) => {
                warn!("Backend not ready ({}), using placeholder dashboard", e);
                (fallback_payload(), true)
            }
        };

        let mut snapshot = self.snapshot.write();
        snapshot.stats = Some(payload.stats);
        snapshot.links = payload.links;
        snapshot.from_fallback = from_fallback;
        snapshot.phase = DashboardPhase::Ready;
    }

    /// Manual re-fetch after an out-of-band mutation
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Remove a link locally, then ask the backend to delete it
    ///
    /// The row is gone from the list before the request is sent and is not
    /// restored if the backend call fails; the outcome is only reported.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.snapshot.write().links.retain(|l| l.id != id);

        match self.registry.delete(id).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Delete of {} failed ({}), removed from view only", id, e);
                Err(e)
            }
        }
    }

    pub fn copy(&self, text: &str) -> Result<()> {
        self.clipboard.set_text(text)?;
        info!("Copied: {}", text);
        Ok(())
    }

    /// Drop everything held for the previous session
    pub fn reset(&self) {
        *self.snapshot.write() = DashboardSnapshot::default();
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().clone()
    }

    pub fn phase(&self) -> DashboardPhase {
        self.snapshot.read().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == DashboardPhase::Loading
    }

    pub fn stats(&self) -> Option<DashboardStats> {
        self.snapshot.read().stats.clone()
    }

    pub fn links(&self) -> Vec<LinkSummary> {
        self.snapshot.read().links.clone()
    }

    pub fn search(&self, term: &str) -> Vec<LinkSummary> {
        let snapshot = self.snapshot.read();
        filter_links(&snapshot.links, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Re-fetch once if a create/update was published since the last check
    ///
    /// Returns whether a fetch happened. Always `false` while the auto-refresh
    /// task owns the subscription.
    pub async fn sync_pending(&self) -> bool {
        let pending = {
            let Ok(mut rx) = self.link_signal.try_lock() else {
                return false;
            };
            rx.has_changed().unwrap_or(false) && rx.borrow_and_update().is_some()
        };

        if pending {
            self.fetch().await;
        }
        pending
    }

    /// Fetch now, then keep the dashboard in step with the registry and the
    /// session until the returned task is aborted
    ///
    /// - create/update published → re-fetch
    /// - login → re-fetch
    /// - logout → [`reset`](Self::reset)
    pub fn spawn_auto_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let mut session_rx = this.session.subscribe();
            session_rx.borrow_and_update();
            let mut link_rx = this.link_signal.lock().await;

            this.fetch().await;

            loop {
                tokio::select! {
                    changed = link_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let published = link_rx.borrow_and_update().is_some();
                        if published {
                            this.fetch().await;
                        }
                    }
                    changed = session_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let authenticated = *session_rx.borrow_and_update();
                        if authenticated {
                            this.fetch().await;
                        } else {
                            this.reset();
                        }
                    }
                }
            }
            debug!("Dashboard auto-refresh stopped");
        })
    }
}
