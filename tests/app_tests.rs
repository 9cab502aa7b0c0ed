//! AppContext and CLI command integration tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;

use tinylink::AppContext;
use tinylink::cli::{Commands, ThemeCommands};
use tinylink::clipboard::MemoryClipboard;
use tinylink::config::StaticConfig;
use tinylink::errors::TinylinkError;
use tinylink::interfaces::cli::{CliError, run_cli_command};
use tinylink::links::{LINKS_PATH, MY_LINKS_PATH};
use tinylink::storage::{MemoryStore, PersistentStore, THEME_KEY, TOKEN_KEY};
use tinylink::theme::Theme;
use tinylink::transport::{HttpMethod, StubTransport};

#[derive(Serialize)]
struct BackendClaims {
    id: String,
    email: String,
    exp: i64,
}

fn mint(exp: i64) -> String {
    let claims = BackendClaims {
        id: "owner-1".to_string(),
        email: "owner@example.com".to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn live_token() -> String {
    mint((Utc::now() + Duration::hours(1)).timestamp())
}

struct Fixture {
    store: Arc<MemoryStore>,
    stub: Arc<StubTransport>,
    clipboard: Arc<MemoryClipboard>,
    ctx: AppContext,
}

fn fixture() -> Fixture {
    let store = MemoryStore::arc();
    let stub = StubTransport::arc();
    let clipboard = MemoryClipboard::arc();
    let ctx = AppContext::new(
        store.clone(),
        stub.clone(),
        clipboard.clone(),
        "https://api.tinyl.ink/",
    );
    Fixture {
        store,
        stub,
        clipboard,
        ctx,
    }
}

fn my_links_body() -> serde_json::Value {
    json!({
        "stats": {"totalLinks": 1, "totalClicks": 3, "popular": "tinyl.ink/x", "activity": null},
        "links": [{"id": "x1", "title": "X", "short": "tinyl.ink/x", "long": "https://x.example.com", "clicks": 3}]
    })
}

// =============================================================================
// AppContext
// =============================================================================

#[test]
fn test_short_url_uses_trimmed_base() {
    let fx = fixture();
    assert_eq!(fx.ctx.base_url(), "https://api.tinyl.ink");
    assert_eq!(fx.ctx.short_url("promo"), "https://api.tinyl.ink/promo");
}

#[tokio::test]
async fn test_logout_clears_token_and_dashboard() {
    let fx = fixture();
    fx.stub
        .respond(HttpMethod::Get, MY_LINKS_PATH, 200, my_links_body());
    fx.ctx.session.login(&live_token()).unwrap();
    fx.ctx.dashboard.fetch().await;
    assert_eq!(fx.ctx.dashboard.links().len(), 1);

    fx.ctx.logout();

    assert!(!fx.ctx.session.is_authenticated());
    assert_eq!(fx.store.get(TOKEN_KEY).unwrap(), None);
    assert!(fx.ctx.dashboard.stats().is_none());
    assert!(fx.ctx.dashboard.links().is_empty());
}

#[test]
fn test_theme_shares_store_with_session() {
    let fx = fixture();
    fx.ctx.session.login(&live_token()).unwrap();
    fx.ctx.theme.set(Theme::Dark).unwrap();

    assert_eq!(fx.store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert!(fx.store.get(TOKEN_KEY).unwrap().is_some());

    // 退出登录不影响主题
    fx.ctx.logout();
    assert_eq!(fx.store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_from_config_uses_file_store() {
    let dir = TempDir::new().unwrap();
    let mut config = StaticConfig::default();
    config.storage.path = dir
        .path()
        .join("nested/state.json")
        .to_string_lossy()
        .into_owned();

    let token = live_token();
    {
        let ctx = AppContext::from_config(&config).unwrap();
        ctx.session.login(&token).unwrap();
        ctx.theme.toggle().unwrap();
    }

    let ctx = AppContext::from_config(&config).unwrap();
    assert_eq!(ctx.session.token(), Some(token));
    assert_eq!(ctx.theme.current(), Theme::Dark);
    assert_eq!(ctx.base_url(), "http://localhost:5000/api");
}

// =============================================================================
// CLI commands
// =============================================================================

#[tokio::test]
async fn test_protected_command_requires_login() {
    let fx = fixture();
    let err = run_cli_command(&fx.ctx, Commands::List { search: None })
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Api(TinylinkError::Unauthenticated(_))));
    assert_eq!(fx.stub.call_count(), 0);
}

#[tokio::test]
async fn test_expired_session_is_logged_out_by_command() {
    let fx = fixture();
    fx.ctx
        .session
        .login(&mint((Utc::now() - Duration::minutes(1)).timestamp()))
        .unwrap();

    let result = run_cli_command(&fx.ctx, Commands::Show { id: "x1".to_string() }).await;

    assert!(result.is_err());
    assert!(!fx.ctx.session.is_authenticated());
    assert_eq!(fx.stub.call_count(), 0);
}

#[tokio::test]
async fn test_login_command_persists_token() {
    let fx = fixture();
    let token = live_token();
    run_cli_command(&fx.ctx, Commands::Login { token: token.clone() })
        .await
        .unwrap();
    assert_eq!(fx.store.get(TOKEN_KEY).unwrap(), Some(token));

    run_cli_command(&fx.ctx, Commands::Logout).await.unwrap();
    assert_eq!(fx.store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_create_command_refreshes_dashboard_once() {
    let fx = fixture();
    fx.ctx.session.login(&live_token()).unwrap();
    fx.stub
        .respond(
            HttpMethod::Post,
            LINKS_PATH,
            201,
            json!({"data": {"_id": "x1", "longUrl": "https://x.example.com", "shortCode": "x"}}),
        )
        .respond(HttpMethod::Get, MY_LINKS_PATH, 200, my_links_body());

    run_cli_command(
        &fx.ctx,
        Commands::Create {
            url: "https://x.example.com".to_string(),
            code: None,
            title: Some("X".to_string()),
            generate: true,
        },
    )
    .await
    .unwrap();

    let body = fx.stub.calls()[0].body.clone().unwrap();
    let code = body["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    assert_eq!(fx.stub.calls_to(HttpMethod::Get, MY_LINKS_PATH), 1);
    assert_eq!(fx.ctx.dashboard.links().len(), 1);
}

#[tokio::test]
async fn test_show_missing_link_is_command_error() {
    let fx = fixture();
    fx.ctx.session.login(&live_token()).unwrap();
    fx.stub
        .respond(HttpMethod::Get, "/shortlink/nope", 200, json!({"data": null}));

    let err = run_cli_command(&fx.ctx, Commands::Show { id: "nope".to_string() })
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::CommandError(_)));
}

#[tokio::test]
async fn test_copy_and_theme_commands() {
    let fx = fixture();

    run_cli_command(
        &fx.ctx,
        Commands::Copy {
            text: "https://api.tinyl.ink/x".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        fx.clipboard.contents().as_deref(),
        Some("https://api.tinyl.ink/x")
    );

    run_cli_command(
        &fx.ctx,
        Commands::Theme {
            action: Some(ThemeCommands::Toggle),
        },
    )
    .await
    .unwrap();
    assert_eq!(fx.ctx.theme.current(), Theme::Dark);

    let err = run_cli_command(
        &fx.ctx,
        Commands::Theme {
            action: Some(ThemeCommands::Set {
                theme: "neon".to_string(),
            }),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::ParseError(_)));
}
