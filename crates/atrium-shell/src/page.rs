//! Scaffold page generation.
//!
//! Renders the HTML document the shell displays and the CSS that styles
//! it. Theme colors and panel dimensions are emitted as CSS custom
//! properties on `:root` so a config reload can restyle the live page
//! with a `setProperty` script instead of a reload.

use atrium_common::types::{CallConvention, ElementRole};
use atrium_config::AtriumConfig;

use crate::layout::css_px;
use crate::surface::js_escape;

/// DOM id of the embedded `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "atrium-style";

// =============================================================================
// THEME VARIABLES
// =============================================================================

/// The custom properties shared by [`render_stylesheet`] and
/// [`theme_update_script`]. Dimension values carry their `px` unit.
fn theme_vars(config: &AtriumConfig) -> Vec<(&'static str, String)> {
    vec![
        ("--app-bar-color", config.theme.app_bar_color.clone()),
        ("--drawer-color", config.theme.drawer_color.clone()),
        ("--content-color", config.theme.content_color.clone()),
        ("--bottom-nav-color", config.theme.bottom_nav_color.clone()),
        ("--accent-color", config.theme.accent_color.clone()),
        ("--text-color", config.theme.text_color.clone()),
        ("--app-bar-height", css_px(config.scaffold.app_bar_height)),
        ("--bottom-nav-height", css_px(config.scaffold.bottom_nav_height)),
        ("--left-drawer-width", css_px(config.scaffold.left_drawer_width)),
        ("--right-drawer-width", css_px(config.scaffold.right_drawer_width)),
    ]
}

/// Generate a JavaScript snippet that re-sets the theme custom properties
/// on the live page.
///
/// Uses `document.documentElement.style.setProperty()` for each variable,
/// which updates them without a page reload.
pub fn theme_update_script(config: &AtriumConfig) -> String {
    let mut js = String::from("(function() {\n  var s = document.documentElement.style;\n");
    for (name, value) in theme_vars(config) {
        js.push_str(&format!(
            "  s.setProperty('{}', '{}');\n",
            js_escape(name),
            js_escape(&value)
        ));
    }
    js.push_str("})();");
    js
}

// =============================================================================
// STYLESHEET
// =============================================================================

/// Generate the embedded stylesheet: a `:root` variable block followed by
/// the structural scaffold rules.
pub fn render_stylesheet(config: &AtriumConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in theme_vars(config) {
        css.push_str(&format!("  {name}: {value};\n"));
    }
    css.push_str("}\n");

    css.push_str(
        r#"* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { height: 100%; overflow: hidden; }
body {
  display: flex;
  flex-direction: column;
  font-family: sans-serif;
}
#app-bar {
  height: var(--app-bar-height);
  background-color: var(--app-bar-color);
  color: var(--text-color);
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0 16px;
  transition: margin-left 0.3s ease, margin-right 0.3s ease;
  z-index: 4;
}
#content {
  flex: 1;
  background-color: var(--content-color);
  padding: 20px;
  overflow-y: auto;
  transition: margin-left 0.3s ease, margin-right 0.3s ease;
}
#left-drawer, #right-drawer {
  position: fixed;
  top: 0;
  bottom: 0;
  background-color: var(--drawer-color);
  padding: 16px;
  transition: transform 0.3s ease;
  z-index: 8;
}
#left-drawer {
  left: 0;
  width: var(--left-drawer-width);
  transform: translateX(-100%);
}
#right-drawer {
  right: 0;
  width: var(--right-drawer-width);
  transform: translateX(100%);
}
#left-drawer.open, #right-drawer.open { transform: translateX(0); }
#bottom-nav {
  height: var(--bottom-nav-height);
  background-color: var(--bottom-nav-color);
  color: var(--text-color);
  display: flex;
  align-items: stretch;
  transition: transform 0.3s ease;
  z-index: 4;
}
#bottom-nav.hidden { transform: translateY(100%); }
#bottom-nav button {
  flex: 1;
  background: none;
  border: none;
  color: inherit;
  font-size: 14px;
  cursor: pointer;
}
#bottom-sheet {
  position: fixed;
  left: 0;
  right: 0;
  bottom: 0;
  background-color: #ffffff;
  padding: 16px;
  border-radius: 12px 12px 0 0;
  box-shadow: 0 -2px 8px rgba(0, 0, 0, 0.2);
  transform: translateY(100%);
  transition: transform 0.3s ease;
  z-index: 12;
}
#snack-bar {
  position: fixed;
  left: 50%;
  transform: translateX(-50%);
  bottom: calc(var(--bottom-nav-height) + 16px);
  background-color: #323232;
  color: #ffffff;
  padding: 12px 16px;
  border-radius: 4px;
  display: none;
  align-items: center;
  gap: 12px;
  z-index: 16;
}
#snack-bar button {
  background: none;
  border: none;
  color: var(--accent-color);
  font-weight: bold;
  cursor: pointer;
}
.bar-button {
  background: none;
  border: none;
  color: inherit;
  font-size: 20px;
  cursor: pointer;
}
.action-button {
  background-color: var(--accent-color);
  border: none;
  border-radius: 4px;
  padding: 10px 16px;
  margin: 8px 8px 0 0;
  cursor: pointer;
}
"#,
    );
    css
}

// =============================================================================
// CALL EXPRESSIONS
// =============================================================================

/// The JS expression for one button press under the active convention.
///
/// Nested routes through the namespaced api object; flat uses the
/// string-only variant when there are no arguments. `args` entries are
/// raw JS expressions and go in verbatim.
pub fn click_call(convention: CallConvention, namespace: &str, name: &str, args: &[&str]) -> String {
    let name = js_escape(name);
    match convention {
        CallConvention::Nested => {
            let mut call = format!("{namespace}.api.on_pressed('{name}'");
            for arg in args {
                call.push_str(", ");
                call.push_str(arg);
            }
            call.push(')');
            call
        }
        CallConvention::Flat if args.is_empty() => format!("on_pressed_str('{name}')"),
        CallConvention::Flat => {
            let mut call = format!("on_pressed('{name}'");
            for arg in args {
                call.push_str(", ");
                call.push_str(arg);
            }
            call.push(')');
            call
        }
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Render the full scaffold document.
///
/// Every interactive element's `onclick` is emitted through
/// [`click_call`] so the markup matches the configured convention.
pub fn render_page(config: &AtriumConfig) -> String {
    let convention = config.bridge.call_convention();
    let namespace = config.bridge.namespace.as_str();
    let call = |name: &str, args: &[&str]| click_call(convention, namespace, name, args);

    let title = html_escape(&config.window.title);
    let css = render_stylesheet(config);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(&format!(
        "<style id=\"{STYLE_ELEMENT_ID}\">\n{css}</style>\n"
    ));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        concat!(
            "<header id=\"{}\">\n",
            "  <button class=\"bar-button\" onclick=\"{}\">&#9776;</button>\n",
            "  <span>{}</span>\n",
            "  <button class=\"bar-button\" onclick=\"{}\">&#8942;</button>\n",
            "</header>\n"
        ),
        ElementRole::AppBar.dom_id(),
        call("toggle_left_drawer", &[]),
        title,
        call("toggle_right_drawer", &[]),
    ));

    html.push_str(&format!(
        concat!(
            "<main id=\"{}\">\n",
            "  <h2>Welcome</h2>\n",
            "  <p>Toggle the drawers from the app bar. The content and app bar\n",
            "  margins follow whichever drawers are open.</p>\n",
            "  <button class=\"action-button\" onclick=\"{}\">Show bottom sheet</button>\n",
            "  <button class=\"action-button\" onclick=\"{}\">Save</button>\n",
            "</main>\n"
        ),
        ElementRole::Content.dom_id(),
        call("show_bottom_sheet", &[]),
        call("save_document", &[]),
    ));

    html.push_str(&format!(
        concat!(
            "<nav id=\"{}\">\n",
            "  <h3>Navigation</h3>\n",
            "  <p>Inbox</p>\n",
            "  <p>Starred</p>\n",
            "  <p>Archive</p>\n",
            "</nav>\n"
        ),
        ElementRole::LeftDrawer.dom_id(),
    ));

    html.push_str(&format!(
        concat!(
            "<nav id=\"{}\">\n",
            "  <h3>Details</h3>\n",
            "  <p>Nothing selected.</p>\n",
            "</nav>\n"
        ),
        ElementRole::RightDrawer.dom_id(),
    ));

    html.push_str(&format!(
        concat!(
            "<nav id=\"{}\">\n",
            "  <button onclick=\"{}\">Home</button>\n",
            "  <button onclick=\"{}\">Search</button>\n",
            "  <button onclick=\"{}\">Profile</button>\n",
            "</nav>\n"
        ),
        ElementRole::BottomNav.dom_id(),
        call("select_nav_item", &["0"]),
        call("select_nav_item", &["1"]),
        call("select_nav_item", &["2"]),
    ));

    html.push_str(&format!(
        concat!(
            "<div id=\"{}\">\n",
            "  <h3>Bottom sheet</h3>\n",
            "  <p>Slides up over the content.</p>\n",
            "  <button class=\"action-button\" onclick=\"{}\">Close</button>\n",
            "</div>\n"
        ),
        ElementRole::BottomSheet.dom_id(),
        call("hide_bottom_sheet", &[]),
    ));

    html.push_str(&format!(
        concat!(
            "<div id=\"{}\">\n",
            "  <span id=\"{}\"></span>\n",
            "  <button onclick=\"{}\">Dismiss</button>\n",
            "</div>\n"
        ),
        ElementRole::SnackBar.dom_id(),
        ElementRole::SnackBarText.dom_id(),
        call("dismiss_snack_bar", &[]),
    ));

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for embedding in HTML content or a double-quoted attribute.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_contains_theme_variables() {
        let mut config = AtriumConfig::default();
        config.theme.app_bar_color = "#112233".to_string();
        config.scaffold.left_drawer_width = 300.0;

        let css = render_stylesheet(&config);
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--app-bar-color: #112233;"));
        assert!(css.contains("--left-drawer-width: 300px;"));
        assert!(css.contains("--right-drawer-width: 250px;"));
        assert!(css.contains("--app-bar-height: 60px;"));
    }

    #[test]
    fn stylesheet_has_structural_rules() {
        let css = render_stylesheet(&AtriumConfig::default());
        assert!(css.contains("#left-drawer {"));
        assert!(css.contains("transform: translateX(-100%);"));
        assert!(css.contains("#right-drawer {"));
        assert!(css.contains("transform: translateX(100%);"));
        assert!(css.contains("#left-drawer.open, #right-drawer.open { transform: translateX(0); }"));
        assert!(css.contains("#bottom-nav.hidden { transform: translateY(100%); }"));
        assert!(css.contains("transition: margin-left 0.3s ease, margin-right 0.3s ease;"));
        assert!(css.contains("display: none;"));
    }

    #[test]
    fn theme_update_script_sets_properties() {
        let mut config = AtriumConfig::default();
        config.theme.drawer_color = "#445566".to_string();
        config.scaffold.right_drawer_width = 320.0;

        let js = theme_update_script(&config);
        assert!(js.contains("document.documentElement.style"));
        assert!(js.contains("s.setProperty('--drawer-color', '#445566');"));
        assert!(js.contains("s.setProperty('--right-drawer-width', '320px');"));
        assert!(js.ends_with("})();"));
    }

    #[test]
    fn page_includes_every_scaffold_element() {
        let html = render_page(&AtriumConfig::default());
        for role in ElementRole::ALL {
            assert!(
                html.contains(&format!("id=\"{}\"", role.dom_id())),
                "missing element: {}",
                role.dom_id()
            );
        }
        assert!(html.contains(&format!("<style id=\"{STYLE_ELEMENT_ID}\">")));
    }

    #[test]
    fn page_uses_nested_convention_by_default() {
        let html = render_page(&AtriumConfig::default());
        assert!(html.contains("pywebview.api.on_pressed('toggle_left_drawer')"));
        assert!(html.contains("pywebview.api.on_pressed('select_nav_item', 2)"));
        assert!(!html.contains("on_pressed_str("));
    }

    #[test]
    fn page_uses_flat_convention_when_configured() {
        let mut config = AtriumConfig::default();
        config.bridge.convention = "flat".to_string();

        let html = render_page(&config);
        assert!(html.contains("on_pressed_str('toggle_right_drawer')"));
        assert!(html.contains("on_pressed('select_nav_item', 1)"));
        assert!(!html.contains(".api.on_pressed"));
    }

    #[test]
    fn page_escapes_title() {
        let mut config = AtriumConfig::default();
        config.window.title = "Notes <beta> & \"draft\"".to_string();

        let html = render_page(&config);
        assert!(html.contains("<title>Notes &lt;beta&gt; &amp; &quot;draft&quot;</title>"));
        assert!(!html.contains("<beta>"));
    }

    #[test]
    fn click_call_nested_with_args() {
        let call = click_call(CallConvention::Nested, "pywebview", "select_nav_item", &["3"]);
        assert_eq!(call, "pywebview.api.on_pressed('select_nav_item', 3)");
    }

    #[test]
    fn click_call_nested_honors_namespace() {
        let call = click_call(CallConvention::Nested, "hostbridge", "save_document", &[]);
        assert_eq!(call, "hostbridge.api.on_pressed('save_document')");
    }

    #[test]
    fn click_call_flat_picks_variant_by_arity() {
        let bare = click_call(CallConvention::Flat, "pywebview", "save_document", &[]);
        assert_eq!(bare, "on_pressed_str('save_document')");

        let with_args = click_call(CallConvention::Flat, "pywebview", "select_nav_item", &["0"]);
        assert_eq!(with_args, "on_pressed('select_nav_item', 0)");
    }

    #[test]
    fn click_call_escapes_quotes_in_name() {
        let call = click_call(CallConvention::Nested, "pywebview", "it's", &[]);
        assert!(call.contains("on_pressed('it\\'s')"));
    }
}
