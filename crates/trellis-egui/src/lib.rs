//! egui backends for Trellis.
//!
//! A [`Backend`] owns an [`egui::Context`] and whatever sits underneath it:
//! the winit window and wgpu renderer for [`WindowedBackend`], or nothing at
//! all for [`HeadlessBackend`], which drives frames from scripted input.

mod backend;
mod fonts;
mod headless;
mod texture;
#[cfg(feature = "windowed")]
mod windowed;

pub use backend::{Backend, BackendError, Theme, configure_context};
pub use fonts::{FontError, FontRegistry, apply_font_size};
pub use headless::{FrameSummary, HeadlessBackend, HeadlessConfig};
pub use texture::{Texture, TextureError, TextureSource, load_texture};
#[cfg(feature = "windowed")]
pub use windowed::{WindowedBackend, WindowedConfig};

pub use egui;
