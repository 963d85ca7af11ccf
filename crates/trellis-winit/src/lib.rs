pub mod event;
pub mod platform;
pub mod time;
pub mod window;

// Re-export WindowId for convenience
pub use winit::window::WindowId;

pub use platform::{Platform, PlatformError};
pub use time::{FramePacer, FrameTime, TimeTracker};
