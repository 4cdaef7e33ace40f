//! Host callbacks behind the bridge.
//!
//! Every name the scaffold page can press is registered here. Handlers
//! run on the forwarding task, so they only translate presses into
//! [`ScaffoldCommand`]s and send them to the main event loop; all state
//! lives with the `ScaffoldManager` on the winit thread.

use std::sync::mpsc::Sender;

use serde_json::Value;

use atrium_common::types::DockSide;
use atrium_shell::ScaffoldCommand;
use atrium_webview::CallbackRegistry;

fn forward_command(tx: &Sender<ScaffoldCommand>, cmd: ScaffoldCommand) -> Result<(), String> {
    tx.send(cmd).map_err(|_| "command channel closed".to_string())
}

/// Register the full callback set for the scaffold page.
pub fn register_callbacks(registry: &CallbackRegistry, tx: Sender<ScaffoldCommand>) {
    let simple = [
        (
            "toggle_left_drawer",
            ScaffoldCommand::ToggleDrawer(DockSide::Left),
        ),
        (
            "toggle_right_drawer",
            ScaffoldCommand::ToggleDrawer(DockSide::Right),
        ),
        ("show_bottom_sheet", ScaffoldCommand::ShowBottomSheet),
        ("hide_bottom_sheet", ScaffoldCommand::HideBottomSheet),
        ("dismiss_snack_bar", ScaffoldCommand::HideSnackBar),
    ];
    for (name, cmd) in simple {
        let tx = tx.clone();
        registry.register(name, move |_args| forward_command(&tx, cmd.clone()));
    }

    {
        let tx = tx.clone();
        registry.register("select_nav_item", move |args| {
            let index = args
                .first()
                .and_then(Value::as_u64)
                .ok_or_else(|| "select_nav_item expects a numeric index".to_string())?;
            forward_command(
                &tx,
                ScaffoldCommand::ShowSnackBar(format!("Selected item {index}")),
            )
        });
    }

    registry.register("save_document", move |_args| {
        forward_command(&tx, ScaffoldCommand::ShowSnackBar("Document saved".to_string()))
    });
}

// =============================================================================
// TESTS
// =============================================================================
