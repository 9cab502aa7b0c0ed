use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to an in-memory default when `init_config()` has not run,
/// so library users that build their own `AppContext` never hit a panic.
pub fn get_config() -> Arc<StaticConfig> {
    match CONFIG.get() {
        Some(config) => config.load_full(),
        None => Arc::new(StaticConfig::default()),
    }
}

/// Initialize the global configuration from the default file location
///
/// # Examples
/// ```no_run
/// use tinylink::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(None);
}

/// Initialize the global configuration from an explicit file path
///
/// Later calls replace the stored value.
pub fn init_config_from(path: Option<&str>) {
    let loaded = Arc::new(StaticConfig::load_from(path));
    CONFIG
        .get_or_init(|| ArcSwap::from(loaded.clone()))
        .store(loaded);
}
