use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Which side of the scaffold a drawer panel docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSide {
    Left,
    Right,
}

impl DockSide {
    pub fn opposite(&self) -> Self {
        match self {
            DockSide::Left => DockSide::Right,
            DockSide::Right => DockSide::Left,
        }
    }
}

impl fmt::Display for DockSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockSide::Left => write!(f, "left"),
            DockSide::Right => write!(f, "right"),
        }
    }
}

/// Open/closed state of a drawer panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Open,
    Closed,
}

impl PanelState {
    /// The other state. Flipping twice always returns the original value.
    pub fn flipped(&self) -> Self {
        match self {
            PanelState::Open => PanelState::Closed,
            PanelState::Closed => PanelState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open)
    }
}

/// The fixed scaffold elements a render surface can address.
///
/// The scaffold has no dynamic entities; everything the shell ever touches
/// in the page is one of these roles, located by its `dom_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRole {
    LeftDrawer,
    RightDrawer,
    Content,
    AppBar,
    BottomNav,
    BottomSheet,
    SnackBar,
    SnackBarText,
}

impl ElementRole {
    pub const ALL: [ElementRole; 8] = [
        ElementRole::LeftDrawer,
        ElementRole::RightDrawer,
        ElementRole::Content,
        ElementRole::AppBar,
        ElementRole::BottomNav,
        ElementRole::BottomSheet,
        ElementRole::SnackBar,
        ElementRole::SnackBarText,
    ];

    /// Element id of this role in the generated scaffold page.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementRole::LeftDrawer => "left-drawer",
            ElementRole::RightDrawer => "right-drawer",
            ElementRole::Content => "content",
            ElementRole::AppBar => "app-bar",
            ElementRole::BottomNav => "bottom-nav",
            ElementRole::BottomSheet => "bottom-sheet",
            ElementRole::SnackBar => "snack-bar",
            ElementRole::SnackBarText => "snack-bar-text",
        }
    }

    /// The drawer role docked to the given side.
    pub fn drawer(side: DockSide) -> Self {
        match side {
            DockSide::Left => ElementRole::LeftDrawer,
            DockSide::Right => ElementRole::RightDrawer,
        }
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dom_id())
    }
}

/// Page-facing calling convention installed by the bridge bootstrap script.
///
/// `Nested` exposes `window.<namespace>.api.on_pressed(name, ...args)`;
/// `Flat` exposes `window.on_pressed(name, ...args)` plus the no-argument
/// `window.on_pressed_str(name)`. Exactly one convention is active per
/// process; both post the identical press message to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallConvention {
    Nested,
    Flat,
}

impl FromStr for CallConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(CallConvention::Nested),
            "flat" => Ok(CallConvention::Flat),
            other => Err(ConfigError::ParseError(format!(
                "unknown call convention '{other}' (expected 'nested' or 'flat')"
            ))),
        }
    }
}

impl fmt::Display for CallConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallConvention::Nested => write!(f, "nested"),
            CallConvention::Flat => write!(f, "flat"),
        }
    }
}

/// How drawer position and bottom-nav visibility are written to the page.
///
/// `ClassToggle` flips CSS classes (`open`, `hidden`) and leaves the motion
/// to stylesheet transitions; `InlineStyle` writes `transform` styles
/// directly. Content and app-bar margins are inline styles under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutStrategy {
    #[serde(rename = "class")]
    ClassToggle,
    #[serde(rename = "inline")]
    InlineStyle,
}

impl FromStr for LayoutStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(LayoutStrategy::ClassToggle),
            "inline" => Ok(LayoutStrategy::InlineStyle),
            other => Err(ConfigError::ParseError(format!(
                "unknown layout strategy '{other}' (expected 'class' or 'inline')"
            ))),
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutStrategy::ClassToggle => write!(f, "class"),
            LayoutStrategy::InlineStyle => write!(f, "inline"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Self {
                    r: (v >> 16) as u8,
                    g: (v >> 8) as u8,
                    b: v as u8,
                    a: 255,
                })
            }
            8 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Self {
                    r: (v >> 24) as u8,
                    g: (v >> 16) as u8,
                    b: (v >> 8) as u8,
                    a: v as u8,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_side_opposite() {
        assert_eq!(DockSide::Left.opposite(), DockSide::Right);
        assert_eq!(DockSide::Right.opposite(), DockSide::Left);
    }

    #[test]
    fn dock_side_display() {
        assert_eq!(DockSide::Left.to_string(), "left");
        assert_eq!(DockSide::Right.to_string(), "right");
    }

    #[test]
    fn panel_state_flip_is_involution() {
        assert_eq!(PanelState::Closed.flipped(), PanelState::Open);
        assert_eq!(PanelState::Open.flipped(), PanelState::Closed);
        assert_eq!(PanelState::Closed.flipped().flipped(), PanelState::Closed);
        assert_eq!(PanelState::Open.flipped().flipped(), PanelState::Open);
    }

    #[test]
    fn panel_state_is_open() {
        assert!(PanelState::Open.is_open());
        assert!(!PanelState::Closed.is_open());
    }

    #[test]
    fn element_role_ids_are_unique() {
        use std::collections::HashSet;
        let ids: HashSet<&str> = ElementRole::ALL.iter().map(|r| r.dom_id()).collect();
        assert_eq!(ids.len(), ElementRole::ALL.len());
    }

    #[test]
    fn element_role_drawer_for_side() {
        assert_eq!(ElementRole::drawer(DockSide::Left), ElementRole::LeftDrawer);
        assert_eq!(
            ElementRole::drawer(DockSide::Right),
            ElementRole::RightDrawer
        );
    }

    #[test]
    fn element_role_display_matches_dom_id() {
        assert_eq!(ElementRole::BottomNav.to_string(), "bottom-nav");
        assert_eq!(ElementRole::AppBar.to_string(), "app-bar");
    }

    #[test]
    fn call_convention_parses() {
        assert_eq!(
            "nested".parse::<CallConvention>().unwrap(),
            CallConvention::Nested
        );
        assert_eq!(
            "flat".parse::<CallConvention>().unwrap(),
            CallConvention::Flat
        );
    }

    #[test]
    fn call_convention_rejects_unknown() {
        let err = "qwebchannel".parse::<CallConvention>().unwrap_err();
        assert!(err.to_string().contains("qwebchannel"));
    }

    #[test]
    fn layout_strategy_parses() {
        assert_eq!(
            "class".parse::<LayoutStrategy>().unwrap(),
            LayoutStrategy::ClassToggle
        );
        assert_eq!(
            "inline".parse::<LayoutStrategy>().unwrap(),
            LayoutStrategy::InlineStyle
        );
    }

    #[test]
    fn layout_strategy_rejects_unknown() {
        let err = "absolute".parse::<LayoutStrategy>().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn layout_strategy_display_roundtrip() {
        for strategy in [LayoutStrategy::ClassToggle, LayoutStrategy::InlineStyle] {
            let parsed: LayoutStrategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn color_from_hex_6() {
        let c = Color::from_hex("#6200ee").unwrap();
        assert_eq!(c, Color::from_rgba(0x62, 0x00, 0xee, 255));
    }

    #[test]
    fn color_from_hex_8() {
        let c = Color::from_hex("#6200ee80").unwrap();
        assert_eq!(c, Color::from_rgba(0x62, 0x00, 0xee, 0x80));
    }

    #[test]
    fn color_from_hex_no_hash() {
        let c = Color::from_hex("03dac6").unwrap();
        assert_eq!(c, Color::from_rgba(0x03, 0xda, 0xc6, 255));
    }

    #[test]
    fn color_from_hex_invalid() {
        assert!(Color::from_hex("zzzzzz").is_none());
        assert!(Color::from_hex("#abc").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn color_to_hex_opaque() {
        let c = Color::from_rgba(255, 0, 128, 255);
        assert_eq!(c.to_hex(), "#ff0080");
    }

    #[test]
    fn color_roundtrip_hex() {
        let original = Color::from_rgba(171, 205, 239, 255);
        let parsed = Color::from_hex(&original.to_hex()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn serde_roundtrips() {
        let side_json = serde_json::to_string(&DockSide::Left).unwrap();
        assert_eq!(side_json, "\"left\"");
        let side: DockSide = serde_json::from_str(&side_json).unwrap();
        assert_eq!(side, DockSide::Left);

        let strategy_json = serde_json::to_string(&LayoutStrategy::ClassToggle).unwrap();
        assert_eq!(strategy_json, "\"class\"");

        let convention_json = serde_json::to_string(&CallConvention::Flat).unwrap();
        assert_eq!(convention_json, "\"flat\"");
    }
}
