//! ureq-backed transport
//!
//! ureq is blocking, so every request runs on the blocking pool via
//! `spawn_blocking`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use ureq::{Agent, RequestBuilder};

use super::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use crate::config::ApiConfig;
use crate::errors::{Result, TinylinkError};

pub struct UreqTransport {
    agent: Agent,
    base_url: String,
}

impl UreqTransport {
    pub fn new(api: &ApiConfig) -> Self {
        // 4xx/5xx 也要读取响应体里的 message，因此不把状态码当作错误
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(api.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: api.base().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth<B>(builder: RequestBuilder<B>, auth: Option<&str>) -> RequestBuilder<B> {
        match auth {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        }
    }

    /// 同步发送请求（在 spawn_blocking 中调用）
    fn send_sync(agent: Agent, url: String, request: ApiRequest) -> Result<ApiResponse> {
        let auth = request.bearer.as_ref().map(|t| format!("Bearer {}", t));
        let auth = auth.as_deref();

        let sent = match (request.method, request.body) {
            (HttpMethod::Get, _) => Self::with_auth(agent.get(&url), auth).call(),
            (HttpMethod::Delete, _) => Self::with_auth(agent.delete(&url), auth).call(),
            (HttpMethod::Post, Some(body)) => {
                Self::with_auth(agent.post(&url), auth).send_json(&body)
            }
            (HttpMethod::Post, None) => Self::with_auth(agent.post(&url), auth).send_empty(),
            (HttpMethod::Put, Some(body)) => Self::with_auth(agent.put(&url), auth).send_json(&body),
            (HttpMethod::Put, None) => Self::with_auth(agent.put(&url), auth).send_empty(),
        };

        let resp = sent.map_err(|e| {
            warn!("{} {} failed: {}", request.method, url, e);
            TinylinkError::transport(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let text = resp
            .into_body()
            .read_to_string()
            .map_err(|e| TinylinkError::transport(format!("Failed to read response: {}", e)))?;

        debug!("{} {} -> {}", request.method, url, status);

        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}

/// 空响应体为 Null，非 JSON 响应体按字符串保留
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl HttpTransport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, request.path);

        tokio::task::spawn_blocking(move || Self::send_sync(agent, url, request))
            .await
            .unwrap_or_else(|e| {
                warn!("HTTP spawn_blocking failed: {}", e);
                Err(TinylinkError::transport(e.to_string()))
            })
    }
}
