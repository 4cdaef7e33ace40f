//! TOML config file loading and creation.

use atrium_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use crate::schema::AtriumConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Value ranges are not checked here; see [`load_validated`].
pub fn load_from_path(path: &Path) -> Result<AtriumConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: AtriumConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from a path and run full validation on it.
///
/// Unlike [`load_default`] this never falls back to defaults; callers that
/// already hold a good config (live reload, explicit `--config` overrides)
/// decide for themselves what an invalid file should mean.
pub fn load_validated(path: &Path) -> Result<AtriumConfig, ConfigError> {
    let config = load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/atrium/config.toml`
/// On Linux: `~/.config/atrium/config.toml`
///
/// If the file does not exist, creates a default config file and returns
/// defaults. A file that parses but fails validation also yields defaults,
/// with a warning, so startup always produces a usable config.
pub fn load_default() -> Result<AtriumConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(AtriumConfig::default());
    }

    let config = load_from_path(&path)?;
    if let Err(e) = validation::validate(&config) {
        warn!("config validation failed: {e}");
        warn!("falling back to default config");
        return Ok(AtriumConfig::default());
    }

    Ok(config)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("atrium").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r##"# Atrium Configuration
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Atrium"
# width = 960              # 320-7680
# height = 640             # 240-4320

[scaffold]
# left_drawer_width = 250.0    # 50-600
# right_drawer_width = 250.0   # 50-600
# app_bar_height = 60.0        # 24-200
# bottom_nav_height = 60.0     # 24-200
# strategy = "class"           # class, inline

[bridge]
# convention = "nested"        # nested, flat
# namespace = "pywebview"

[theme]
# app_bar_color = "#6200ee"
# drawer_color = "#add8e6"
# content_color = "#f0f0f0"
# bottom_nav_color = "#6200ee"
# accent_color = "#03dac6"
# text_color = "#ffffff"

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_atrium_config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
[scaffold]
left_drawer_width = 300.0
right_drawer_width = 290.0

[bridge]
convention = "flat"
"##,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.scaffold.left_drawer_width, 300.0);
        assert_eq!(config.scaffold.right_drawer_width, 290.0);
        assert_eq!(config.bridge.convention, "flat");
        // Defaults preserved
        assert_eq!(config.window.title, "Atrium");
        assert_eq!(config.theme.app_bar_color, "#6200ee");
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let result = load_from_path(&path);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_path_does_not_range_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scaffold]
left_drawer_width = 5.0
"#,
        )
        .unwrap();

        // Parsing succeeds; the out-of-range value is the validator's problem
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.scaffold.left_drawer_width, 5.0);
    }

    #[test]
    fn load_validated_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scaffold]
left_drawer_width = 5.0
"#,
        )
        .unwrap();

        let err = load_validated(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn create_and_load_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atrium").join("config.toml");

        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.title, "Atrium");
        assert_eq!(config.scaffold.left_drawer_width, 250.0);
    }

    #[test]
    fn default_config_toml_is_valid() {
        let content = default_config_toml();
        let config: AtriumConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.bridge.namespace, "pywebview");
    }

    #[test]
    fn default_config_path_is_reasonable() {
        // This may not work in all CI environments, but should work locally
        if let Ok(path) = default_config_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("atrium"));
            assert!(path_str.ends_with("config.toml"));
        }
    }
}
