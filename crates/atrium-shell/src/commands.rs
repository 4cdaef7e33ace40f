use atrium_common::types::DockSide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldCommand {
    ToggleDrawer(DockSide),
    RecomputeLayout,
    ShowBottomSheet,
    HideBottomSheet,
    ShowSnackBar(String),
    HideSnackBar,
}
