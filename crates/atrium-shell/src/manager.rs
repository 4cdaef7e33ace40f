//! The ScaffoldManager coordinates drawer state, layout margins, and
//! overlay visibility.

use std::sync::Arc;

use tracing::{debug, info};

use atrium_common::errors::LayoutError;
use atrium_common::types::{DockSide, ElementRole, LayoutStrategy, PanelState};

use crate::commands::ScaffoldCommand;
use crate::layout::{compute_margins, css_px, Margins};
use crate::surface::RenderSurface;

/// Owns the scaffold's UI state and drives the page through an injected
/// [`RenderSurface`]. The page never owns state; after every operation the
/// surface has been told exactly what the current state looks like.
pub struct ScaffoldManager {
    surface: Arc<dyn RenderSurface>,
    strategy: LayoutStrategy,
    /// Left drawer panel state.
    left: PanelState,
    /// Right drawer panel state.
    right: PanelState,
    bottom_sheet_visible: bool,
    snack_bar_visible: bool,
}

impl ScaffoldManager {
    pub fn new(surface: Arc<dyn RenderSurface>, strategy: LayoutStrategy) -> Self {
        Self {
            surface,
            strategy,
            left: PanelState::Closed,
            right: PanelState::Closed,
            bottom_sheet_visible: false,
            snack_bar_visible: false,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn is_open(&self, side: DockSide) -> bool {
        self.panel(side).is_open()
    }

    /// The bottom nav hides whenever either drawer is open.
    pub fn bottom_nav_hidden(&self) -> bool {
        self.left.is_open() || self.right.is_open()
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    pub fn bottom_sheet_visible(&self) -> bool {
        self.bottom_sheet_visible
    }

    pub fn snack_bar_visible(&self) -> bool {
        self.snack_bar_visible
    }

    fn panel(&self, side: DockSide) -> PanelState {
        match side {
            DockSide::Left => self.left,
            DockSide::Right => self.right,
        }
    }

    // -----------------------------------------------------------------------
    // Command dispatch
    // -----------------------------------------------------------------------

    /// Execute a scaffold command.
    pub fn execute(&mut self, cmd: ScaffoldCommand) -> Result<(), LayoutError> {
        match cmd {
            ScaffoldCommand::ToggleDrawer(side) => self.toggle_drawer(side).map(|_| ()),
            ScaffoldCommand::RecomputeLayout => self.recompute_layout().map(|_| ()),
            ScaffoldCommand::ShowBottomSheet => self.show_bottom_sheet(),
            ScaffoldCommand::HideBottomSheet => self.hide_bottom_sheet(),
            ScaffoldCommand::ShowSnackBar(message) => self.show_snack_bar(&message),
            ScaffoldCommand::HideSnackBar => self.hide_snack_bar(),
        }
    }

    // -----------------------------------------------------------------------
    // Drawers and layout
    // -----------------------------------------------------------------------

    /// Flip one drawer between open and closed.
    ///
    /// Every element the operation touches is resolved up front; a missing
    /// element aborts before any state changes. On success the sequence is
    /// fixed: state flip, drawer visual, margin recompute, bottom-nav
    /// visibility from the post-toggle state. The two sides are fully
    /// independent. Returns the margins that were applied.
    pub fn toggle_drawer(&mut self, side: DockSide) -> Result<Margins, LayoutError> {
        for role in [
            ElementRole::LeftDrawer,
            ElementRole::RightDrawer,
            ElementRole::Content,
            ElementRole::AppBar,
            ElementRole::BottomNav,
        ] {
            self.surface.resolve(role)?;
        }

        let state = self.panel(side).flipped();
        match side {
            DockSide::Left => self.left = state,
            DockSide::Right => self.right = state,
        }

        self.apply_drawer_visual(side, state);
        let margins = self.recompute_layout()?;
        self.apply_bottom_nav_visibility();

        info!(side = %side, open = state.is_open(), "drawer toggled");
        Ok(margins)
    }

    /// Rewrite the content-area and app-bar margins from current state.
    ///
    /// Widths are read from the surface on every call, so a width change
    /// between calls is honored on the next recompute. Idempotent:
    /// repeating it writes identical values.
    pub fn recompute_layout(&mut self) -> Result<Margins, LayoutError> {
        self.surface.resolve(ElementRole::Content)?;
        self.surface.resolve(ElementRole::AppBar)?;

        let margins = compute_margins(
            self.left,
            self.right,
            self.surface.panel_width(DockSide::Left),
            self.surface.panel_width(DockSide::Right),
        );

        for role in [ElementRole::Content, ElementRole::AppBar] {
            self.surface
                .set_style(role, "margin-left", &css_px(margins.left));
            self.surface
                .set_style(role, "margin-right", &css_px(margins.right));
        }

        debug!(
            left = margins.left,
            right = margins.right,
            "layout margins recomputed"
        );
        Ok(margins)
    }

    fn apply_drawer_visual(&self, side: DockSide, state: PanelState) {
        let role = ElementRole::drawer(side);
        match self.strategy {
            LayoutStrategy::ClassToggle => {
                self.surface.set_class(role, "open", state.is_open());
            }
            LayoutStrategy::InlineStyle => {
                let value = if state.is_open() {
                    "translateX(0)"
                } else {
                    match side {
                        DockSide::Left => "translateX(-100%)",
                        DockSide::Right => "translateX(100%)",
                    }
                };
                self.surface.set_style(role, "transform", value);
            }
        }
    }

    fn apply_bottom_nav_visibility(&self) {
        let hidden = self.bottom_nav_hidden();
        match self.strategy {
            LayoutStrategy::ClassToggle => {
                self.surface.set_class(ElementRole::BottomNav, "hidden", hidden);
            }
            LayoutStrategy::InlineStyle => {
                let value = if hidden {
                    "translateY(100%)"
                } else {
                    "translateY(0)"
                };
                self.surface.set_style(ElementRole::BottomNav, "transform", value);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Overlays
    // -----------------------------------------------------------------------

    /// Slide the bottom sheet up. Showing an already visible sheet rewrites
    /// the same transform.
    pub fn show_bottom_sheet(&mut self) -> Result<(), LayoutError> {
        self.surface.resolve(ElementRole::BottomSheet)?;
        self.surface
            .set_style(ElementRole::BottomSheet, "transform", "translateY(0)");
        self.bottom_sheet_visible = true;
        info!("bottom sheet shown");
        Ok(())
    }

    /// Slide the bottom sheet off the bottom edge.
    pub fn hide_bottom_sheet(&mut self) -> Result<(), LayoutError> {
        self.surface.resolve(ElementRole::BottomSheet)?;
        self.surface
            .set_style(ElementRole::BottomSheet, "transform", "translateY(100%)");
        self.bottom_sheet_visible = false;
        info!("bottom sheet hidden");
        Ok(())
    }

    /// Show the snack bar with a message. There is no auto-hide; dismissal
    /// is an explicit operation wired to the bar's own button.
    pub fn show_snack_bar(&mut self, message: &str) -> Result<(), LayoutError> {
        self.surface.resolve(ElementRole::SnackBar)?;
        self.surface.resolve(ElementRole::SnackBarText)?;
        self.surface.set_text(ElementRole::SnackBarText, message);
        self.surface
            .set_style(ElementRole::SnackBar, "display", "flex");
        self.snack_bar_visible = true;
        info!(message, "snack bar shown");
        Ok(())
    }

    pub fn hide_snack_bar(&mut self) -> Result<(), LayoutError> {
        self.surface.resolve(ElementRole::SnackBar)?;
        self.surface
            .set_style(ElementRole::SnackBar, "display", "none");
        self.snack_bar_visible = false;
        info!("snack bar hidden");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
