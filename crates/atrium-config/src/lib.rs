//! Atrium configuration system.
//!
//! Provides TOML-based configuration with live reload and full validation.
//! All config sections use sensible defaults so partial configs work out
//! of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use atrium_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.window.title);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

// Re-export core types for convenience
pub use reload::ReloadManager;
pub use schema::AtriumConfig;
pub use watcher::ConfigWatcher;

use atrium_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<AtriumConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AtriumConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = AtriumConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"scaffold\""));
        assert!(json.contains("\"bridge\""));
        assert!(json.contains("\"theme\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = AtriumConfig::default();
        let json = config_to_json(&config);
        let parsed: AtriumConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.window.title, "Atrium");
        assert_eq!(parsed.bridge.convention, "nested");
        assert_eq!(parsed.scaffold.app_bar_height, 60.0);
    }
}
