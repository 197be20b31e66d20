mod app;
pub use app::*;

pub mod input;

mod host_bridge;
pub use host_bridge::*;

mod window_resizing;
