//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod link_management;
mod session;
mod theme;

pub use config_gen::config_generate;
pub use link_management::*;
pub use session::{login, logout, session_status};
pub use theme::run_theme_command;
