use std::num::NonZeroUsize;

use crate::fonts::{FontError, FontRegistry};
use crate::texture::{self, Texture, TextureError, TextureSource};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[cfg(feature = "windowed")]
    #[error(transparent)]
    Platform(#[from] trellis_winit::PlatformError),
    #[cfg(feature = "windowed")]
    #[error(transparent)]
    Graphics(#[from] trellis_render::GraphicsError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Font(#[from] FontError),
}

/// Colour scheme applied to the egui context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// The immediate-mode host a widget tree is drawn into.
///
/// A frame is `begin_frame`, one [`egui::Context::run`] with the returned
/// input, then `end_frame` with its output.
pub trait Backend {
    fn context(&self) -> &egui::Context;

    /// Whether the host asked to stop (window closed, frame limit hit).
    fn should_close(&self) -> bool;

    fn request_close(&mut self);

    /// Poll the host for input and return it for the next pass.
    fn begin_frame(&mut self) -> egui::RawInput;

    /// Present a finished pass.
    fn end_frame(&mut self, output: egui::FullOutput) -> Result<(), BackendError>;

    /// Release host resources. Calling it again is a no-op.
    fn teardown(&mut self);

    fn fonts_mut(&mut self) -> &mut FontRegistry;

    fn load_texture(&mut self, name: &str, source: TextureSource) -> Result<Texture, BackendError> {
        Ok(texture::load_texture(self.context(), name, source)?)
    }

    /// Register a font under `name` and return the family that selects it.
    fn register_font(&mut self, name: &str, bytes: Vec<u8>) -> Result<egui::FontFamily, BackendError> {
        let family = self.fonts_mut().register(name, bytes)?;
        let definitions = self.fonts_mut().definitions();
        self.context().set_fonts(definitions);
        Ok(family)
    }
}

/// Shared context setup for every backend.
///
/// Passes are capped at one so each widget draws exactly once per frame.
pub fn configure_context(ctx: &egui::Context, theme: Theme) {
    ctx.options_mut(|options| options.max_passes = NonZeroUsize::MIN);
    ctx.set_visuals(match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    });
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn context(&self) -> &egui::Context {
        (**self).context()
    }

    fn should_close(&self) -> bool {
        (**self).should_close()
    }

    fn request_close(&mut self) {
        (**self).request_close()
    }

    fn begin_frame(&mut self) -> egui::RawInput {
        (**self).begin_frame()
    }

    fn end_frame(&mut self, output: egui::FullOutput) -> Result<(), BackendError> {
        (**self).end_frame(output)
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }

    fn fonts_mut(&mut self) -> &mut FontRegistry {
        (**self).fonts_mut()
    }

    fn load_texture(&mut self, name: &str, source: TextureSource) -> Result<Texture, BackendError> {
        (**self).load_texture(name, source)
    }

    fn register_font(&mut self, name: &str, bytes: Vec<u8>) -> Result<egui::FontFamily, BackendError> {
        (**self).register_font(name, bytes)
    }
}
