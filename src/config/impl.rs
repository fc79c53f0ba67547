use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config` was never called,
/// so library consumers and tests can read configuration without a file.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration from `config.toml` in the current directory.
///
/// # Examples
/// ```no_run
/// use geolookup::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(None);
}

/// Initialize the global configuration from an explicit path
///
/// If the configuration was already initialized, the new value replaces it.
pub fn init_config_from(path: Option<&str>) {
    set_config(StaticConfig::load(path));
}

/// Replace the global configuration with an already-built value
pub fn set_config(config: StaticConfig) {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .store(Arc::new(config));
}
