//! GPU plumbing for Trellis windows.
//!
//! One [`GraphicsContext`] per process, one [`RenderableWindow`] per OS window,
//! and a [`Frame`] per presented image.

mod context;
mod frame;
mod window;

pub use context::{GraphicsContext, GraphicsContextDescriptor, GraphicsError};
pub use frame::{Frame, FrameStats};
pub use window::{RenderableWindow, SurfaceOptions};

pub use wgpu;
