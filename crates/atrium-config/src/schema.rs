//! Configuration schema types for Atrium.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with sensible defaults.

use atrium_common::types::{CallConvention, DockSide, LayoutStrategy};
use serde::{Deserialize, Serialize};

// =============================================================================
// Window Config
// =============================================================================

/// Top-level window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial window width in logical pixels (valid range: 320-7680).
    pub width: f64,
    /// Initial window height in logical pixels (valid range: 240-4320).
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Atrium".into(),
            width: 960.0,
            height: 640.0,
        }
    }
}

// =============================================================================
// Scaffold Config
// =============================================================================

/// Scaffold geometry and layout behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Left drawer panel width in pixels (valid range: 50-600).
    pub left_drawer_width: f64,
    /// Right drawer panel width in pixels (valid range: 50-600).
    pub right_drawer_width: f64,
    /// App bar height in pixels (valid range: 24-200).
    pub app_bar_height: f64,
    /// Bottom navigation bar height in pixels (valid range: 24-200).
    pub bottom_nav_height: f64,
    /// How drawer motion is applied to the page: "class" or "inline".
    pub strategy: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            left_drawer_width: 250.0,
            right_drawer_width: 250.0,
            app_bar_height: 60.0,
            bottom_nav_height: 60.0,
            strategy: "class".into(),
        }
    }
}

impl ScaffoldConfig {
    /// Configured width of the drawer on the given side.
    pub fn drawer_width(&self, side: DockSide) -> f64 {
        match side {
            DockSide::Left => self.left_drawer_width,
            DockSide::Right => self.right_drawer_width,
        }
    }

    /// Parsed layout strategy; falls back to class toggling if the
    /// configured string is invalid (validation reports it separately).
    pub fn layout_strategy(&self) -> LayoutStrategy {
        self.strategy.parse().unwrap_or(LayoutStrategy::ClassToggle)
    }
}

// =============================================================================
// Bridge Config
// =============================================================================

/// Page-facing bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Calling convention installed in the page: "nested" or "flat".
    pub convention: String,
    /// Name of the page-global bridge object.
    pub namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            convention: "nested".into(),
            namespace: "pywebview".into(),
        }
    }
}

impl BridgeConfig {
    /// Parsed calling convention; falls back to nested if the configured
    /// string is invalid (validation reports it separately).
    pub fn call_convention(&self) -> CallConvention {
        self.convention.parse().unwrap_or(CallConvention::Nested)
    }
}

// =============================================================================
// Theme Config
// =============================================================================

/// Scaffold color palette (hex strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub app_bar_color: String,
    pub drawer_color: String,
    pub content_color: String,
    pub bottom_nav_color: String,
    pub accent_color: String,
    /// Text color on the app bar and bottom nav.
    pub text_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            app_bar_color: "#6200ee".into(),
            drawer_color: "#add8e6".into(),
            content_color: "#f0f0f0".into(),
            bottom_nav_color: "#6200ee".into(),
            accent_color: "#03dac6".into(),
            text_color: "#ffffff".into(),
        }
    }
}

// =============================================================================
// Logging Config
// =============================================================================

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// =============================================================================
// Root Config
// =============================================================================

/// The full Atrium configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtriumConfig {
    pub window: WindowConfig,
    pub scaffold: ScaffoldConfig,
    pub bridge: BridgeConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AtriumConfig::default();
        assert_eq!(config.window.title, "Atrium");
        assert_eq!(config.scaffold.left_drawer_width, 250.0);
        assert_eq!(config.scaffold.right_drawer_width, 250.0);
        assert_eq!(config.bridge.namespace, "pywebview");
        assert_eq!(config.theme.app_bar_color, "#6200ee");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn drawer_width_selects_side() {
        let mut scaffold = ScaffoldConfig::default();
        scaffold.left_drawer_width = 300.0;
        scaffold.right_drawer_width = 290.0;
        assert_eq!(scaffold.drawer_width(DockSide::Left), 300.0);
        assert_eq!(scaffold.drawer_width(DockSide::Right), 290.0);
    }

    #[test]
    fn layout_strategy_parses_configured_string() {
        let mut scaffold = ScaffoldConfig::default();
        assert_eq!(scaffold.layout_strategy(), LayoutStrategy::ClassToggle);
        scaffold.strategy = "inline".into();
        assert_eq!(scaffold.layout_strategy(), LayoutStrategy::InlineStyle);
    }

    #[test]
    fn layout_strategy_falls_back_on_garbage() {
        let mut scaffold = ScaffoldConfig::default();
        scaffold.strategy = "floating".into();
        assert_eq!(scaffold.layout_strategy(), LayoutStrategy::ClassToggle);
    }

    #[test]
    fn call_convention_parses_configured_string() {
        let mut bridge = BridgeConfig::default();
        assert_eq!(bridge.call_convention(), CallConvention::Nested);
        bridge.convention = "flat".into();
        assert_eq!(bridge.call_convention(), CallConvention::Flat);
    }

    #[test]
    fn call_convention_falls_back_on_garbage() {
        let mut bridge = BridgeConfig::default();
        bridge.convention = "qwebchannel".into();
        assert_eq!(bridge.call_convention(), CallConvention::Nested);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AtriumConfig = toml::from_str(
            r#"
[scaffold]
left_drawer_width = 300.0
"#,
        )
        .unwrap();
        assert_eq!(config.scaffold.left_drawer_width, 300.0);
        assert_eq!(config.scaffold.right_drawer_width, 250.0);
        assert_eq!(config.window.title, "Atrium");
    }

    #[test]
    fn integer_dimensions_parse_into_floats() {
        let config: AtriumConfig = toml::from_str(
            r#"
[window]
width = 1280
height = 720
"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.window.height, 720.0);
    }
}
