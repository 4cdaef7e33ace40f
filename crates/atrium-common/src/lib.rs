pub mod errors;
pub mod types;

pub use errors::{AtriumError, BridgeError, ConfigError, LayoutError};
pub use types::{CallConvention, Color, DockSide, ElementRole, LayoutStrategy, PanelState};

pub type Result<T> = std::result::Result<T, AtriumError>;
