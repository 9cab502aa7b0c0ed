//! Tinylink - client state layer for a URL-shortening service
//!
//! This library holds everything a front end needs to talk to the tinylink
//! backend: the bearer-token session, CRUD on short links and the dashboard
//! aggregate that keeps itself in step with both.
//!
//! # Features
//! - **cli**: Command-line front end (default)
//! - **clipboard**: System clipboard through `arboard` (default)
//!
//! # Architecture
//! - `session`: Token lifecycle, expiry check and route guard
//! - `links`: Short-link registry with per-operation loading flags
//! - `dashboard`: Stats + list aggregate, refreshed on registry signals
//! - `transport`: HTTP seam (`ureq` in production, a scripted stub in tests)
//! - `storage`: Persisted key/value state (token, theme)
//! - `config` / `system`: Configuration loading and logging setup

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod dashboard;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod links;
pub mod models;
pub mod session;
pub mod storage;
pub mod system;
pub mod theme;
pub mod transport;
pub mod utils;

pub use app::AppContext;
