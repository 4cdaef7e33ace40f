pub mod commands;
pub mod layout;
pub mod manager;
pub mod page;
pub mod surface;

pub use commands::ScaffoldCommand;
pub use layout::{compute_margins, css_px, Margins};
pub use manager::ScaffoldManager;
pub use page::{click_call, render_page, render_stylesheet, theme_update_script};
pub use surface::{RenderSurface, ScriptQueue, ScriptSurface};
