//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use crate::config::StaticConfig;
use tracing_appender::rolling;

/// Initialize logging system based on configuration
///
/// Console output goes to stderr so that command output on stdout stays
/// machine-readable.
///
/// **Note**: This should be called only once during application startup,
/// after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &StaticConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let log_file = config.logging.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.logging.enable_rotation => {
            let dir = std::path::Path::new(log_file)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(std::path::Path::new("."));
            let filename = std::path::Path::new(log_file)
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("tinylink.log");
            match rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.logging.max_backups as usize)
                .build(dir)
            {
                Ok(appender) => Box::new(appender),
                Err(e) => {
                    eprintln!("[WARN] Failed to create rolling log appender: {}", e);
                    Box::new(std::io::stderr())
                }
            }
        }
        Some(log_file) => {
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
            {
                Ok(file) => Box::new(file),
                Err(e) => {
                    eprintln!("[WARN] Failed to open log file {}: {}", log_file, e);
                    Box::new(std::io::stderr())
                }
            }
        }
        None => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    // 重复初始化（例如测试中）时忽略错误
    if config.logging.format == "json" {
        let _ = subscriber_builder.json().try_init();
    } else {
        let _ = subscriber_builder.try_init();
    }

    guard
}
