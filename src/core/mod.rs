pub mod snapshot;
pub mod overlay_icon;

pub use snapshot::{ProgressSnapshot, RenderSnapshot};
pub use overlay_icon::{OverlayIcon, SeekDirection};
