//! Scripted transport
//!
//! Replies are registered per `(method, path)`. When a route has several
//! queued replies they are consumed in order and the last one repeats.
//! Every request is recorded, including ones with no scripted reply.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use super::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use crate::errors::{Result, TinylinkError};

#[derive(Debug, Clone)]
enum StubReply {
    Respond(ApiResponse),
    Fail(String),
}

type RouteKey = (HttpMethod, String);

#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<RouteKey, VecDeque<StubReply>>>,
    calls: Mutex<Vec<ApiRequest>>,
    gate: Arc<RwLock<()>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn push(&self, method: HttpMethod, path: &str, reply: StubReply) -> &Self {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a reply with the given status and JSON body
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) -> &Self {
        self.push(
            method,
            path,
            StubReply::Respond(ApiResponse::new(status, body)),
        )
    }

    /// Queue a transport-level failure (backend unreachable)
    pub fn fail(&self, method: HttpMethod, path: &str, reason: &str) -> &Self {
        self.push(method, path, StubReply::Fail(reason.to_string()))
    }

    /// Block every subsequent `send` until the returned guard is dropped
    pub async fn hold(&self) -> OwnedRwLockWriteGuard<()> {
        self.gate.clone().write_owned().await
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn next_reply(&self, key: &RouteKey) -> Option<StubReply> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().push(request.clone());
        let _pass = self.gate.read().await;

        let key = (request.method, request.path.clone());
        match self.next_reply(&key) {
            Some(StubReply::Respond(resp)) => Ok(resp),
            Some(StubReply::Fail(reason)) => Err(TinylinkError::transport(reason)),
            None => Err(TinylinkError::transport(format!(
                "no stub for {} {}",
                request.method, request.path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_last_reply_repeats() {
        let stub = StubTransport::new();
        stub.respond(HttpMethod::Get, "/a", 200, json!(1))
            .respond(HttpMethod::Get, "/a", 500, json!(2));

        let first = stub.send(ApiRequest::get("/a")).await.unwrap();
        let second = stub.send(ApiRequest::get("/a")).await.unwrap();
        let third = stub.send(ApiRequest::get("/a")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 500);
        assert_eq!(third.status, 500);
        assert_eq!(stub.calls_to(HttpMethod::Get, "/a"), 3);
    }

    #[tokio::test]
    async fn test_unscripted_route_is_transport_error_and_recorded() {
        let stub = StubTransport::new();
        let err = stub.send(ApiRequest::delete("/x")).await.unwrap_err();
        assert!(matches!(err, TinylinkError::Transport(_)));
        assert_eq!(stub.call_count(), 1);
    }
}
