//! Full configuration validation.
//!
//! Validates numeric ranges, option strings, and color formats.

use atrium_common::types::{CallConvention, Color, LayoutStrategy};
use atrium_common::ConfigError;

use crate::schema::AtriumConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AtriumConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Window constraints
    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }
    validate_range_f64(&mut errors, "window.width", config.window.width, 320.0, 7680.0);
    validate_range_f64(&mut errors, "window.height", config.window.height, 240.0, 4320.0);

    // Scaffold constraints
    validate_range_f64(
        &mut errors,
        "scaffold.left_drawer_width",
        config.scaffold.left_drawer_width,
        50.0,
        600.0,
    );
    validate_range_f64(
        &mut errors,
        "scaffold.right_drawer_width",
        config.scaffold.right_drawer_width,
        50.0,
        600.0,
    );
    validate_range_f64(
        &mut errors,
        "scaffold.app_bar_height",
        config.scaffold.app_bar_height,
        24.0,
        200.0,
    );
    validate_range_f64(
        &mut errors,
        "scaffold.bottom_nav_height",
        config.scaffold.bottom_nav_height,
        24.0,
        200.0,
    );
    if let Err(e) = config.scaffold.strategy.parse::<LayoutStrategy>() {
        errors.push(format!("scaffold.strategy: {e}"));
    }

    // Bridge constraints
    if let Err(e) = config.bridge.convention.parse::<CallConvention>() {
        errors.push(format!("bridge.convention: {e}"));
    }
    if !is_valid_identifier(&config.bridge.namespace) {
        errors.push(format!(
            "bridge.namespace = '{}' must be a JS identifier (letters, digits, '_', not starting with a digit)",
            config.bridge.namespace
        ));
    }

    // Theme constraints
    validate_color(&mut errors, "theme.app_bar_color", &config.theme.app_bar_color);
    validate_color(&mut errors, "theme.drawer_color", &config.theme.drawer_color);
    validate_color(&mut errors, "theme.content_color", &config.theme.content_color);
    validate_color(
        &mut errors,
        "theme.bottom_nav_color",
        &config.theme.bottom_nav_color,
    );
    validate_color(&mut errors, "theme.accent_color", &config.theme.accent_color);
    validate_color(&mut errors, "theme.text_color", &config.theme.text_color);

    // Logging constraints
    if !matches!(
        config.logging.level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(format!(
            "logging.level = '{}' is not one of trace, debug, info, warn, error",
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_color(errors: &mut Vec<String>, name: &str, value: &str) {
    if Color::from_hex(value).is_none() {
        errors.push(format!("{name} = '{value}' is not a #RRGGBB hex color"));
    }
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
