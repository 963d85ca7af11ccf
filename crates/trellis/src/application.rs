//! The run loop.
//!
//! An [`Application`] owns a backend, the root widgets and the log window.
//! Each frame it asks the backend for input, draws the roots in insertion
//! order inside the central panel, draws the log window on top, and hands
//! the output back to the backend.

use std::fmt;
use std::path::Path;

use trellis_core::profiling::{self, profile_function, profile_scope};
use trellis_egui::{
    Backend, BackendError, HeadlessBackend, HeadlessConfig, Texture, TextureSource, apply_font_size,
};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::log::{LogWindow, Logger};
use crate::widget::{AnyWidget, IntoAnyWidget};

/// Name the builder's font is registered under.
pub const DEFAULT_FONT_NAME: &str = "trellis-default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Uninitialized,
    Initialized,
    Running,
    Closed,
}

pub struct Application {
    config: AppConfig,
    state: AppState,
    backend: Option<Box<dyn Backend>>,
    roots: Vec<AnyWidget>,
    log: LogWindow,
    font: Option<Vec<u8>>,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let log = LogWindow::new(config.log.title.clone())
            .with_size(config.log.size)
            .with_position(config.log.position);
        Self {
            config,
            state: AppState::Uninitialized,
            backend: None,
            roots: Vec::new(),
            log,
            font: None,
        }
    }

    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Open the window and GPU backend described by the config.
    #[cfg(feature = "windowed")]
    pub fn init(&mut self) -> Result<(), AppError> {
        self.ensure_uninitialized()?;
        let backend = trellis_egui::WindowedBackend::new(trellis_egui::WindowedConfig {
            title: self.config.title.clone(),
            size: self.config.size,
            vsync: self.config.vsync,
            clear_color: self.config.clear_color,
            theme: self.config.theme,
            target_fps: self.config.target_fps,
        })?;
        self.init_with_backend(backend)
    }

    /// Run without a window, closing after the config's frame limit if any.
    pub fn init_headless(&mut self) -> Result<(), AppError> {
        let config = HeadlessConfig {
            screen_size: egui::vec2(self.config.size.width, self.config.size.height),
            frame_limit: self.config.frame_limit,
            theme: self.config.theme,
            ..Default::default()
        };
        self.init_with_backend(HeadlessBackend::new(config))
    }

    pub fn init_with_backend(&mut self, backend: impl Backend + 'static) -> Result<(), AppError> {
        self.ensure_uninitialized()?;
        let mut backend: Box<dyn Backend> = Box::new(backend);

        if let Some(bytes) = &self.font {
            backend
                .fonts_mut()
                .set_default(DEFAULT_FONT_NAME, bytes.clone())
                .map_err(BackendError::from)?;
            let definitions = backend.fonts_mut().definitions();
            backend.context().set_fonts(definitions);
        }
        apply_font_size(backend.context(), self.config.font_size);

        // the backend owns the font from here on
        self.font = None;
        self.backend = Some(backend);
        self.state = AppState::Initialized;
        tracing::info!("initialized application \"{}\"", self.config.title);
        Ok(())
    }

    fn ensure_uninitialized(&self) -> Result<(), AppError> {
        match self.state {
            AppState::Uninitialized => Ok(()),
            AppState::Closed => Err(AppError::Closed),
            AppState::Initialized | AppState::Running => Err(AppError::AlreadyInitialized),
        }
    }

    /// Append a root widget; roots draw in the order they were added.
    pub fn add(&mut self, widget: impl IntoAnyWidget) -> &mut Self {
        self.roots.push(widget.into_any_widget());
        self
    }

    pub fn roots(&self) -> &[AnyWidget] {
        &self.roots
    }

    pub fn should_run(&self) -> bool {
        matches!(self.state, AppState::Initialized | AppState::Running)
            && self
                .backend
                .as_ref()
                .is_some_and(|backend| !backend.should_close())
    }

    /// Ask the loop to stop once the current frame is done.
    pub fn request_close(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.request_close();
        }
    }

    /// Run exactly one frame.
    pub fn run_frame(&mut self) -> Result<(), AppError> {
        profile_function!();
        let backend = match self.state {
            AppState::Uninitialized => return Err(AppError::NotInitialized),
            AppState::Closed => return Err(AppError::Closed),
            AppState::Initialized | AppState::Running => {
                self.backend.as_mut().ok_or(AppError::NotInitialized)?
            }
        };
        self.state = AppState::Running;

        let input = backend.begin_frame();
        let ctx = backend.context().clone();
        let roots = &self.roots;
        let log = &self.log;
        let output = ctx.run(input, |ctx| {
            profile_scope!("draw_widgets");
            egui::CentralPanel::default().show(ctx, |ui| {
                for root in roots {
                    root.draw(ui);
                }
            });
            log.show(ctx);
        });

        backend.end_frame(output)?;
        profiling::new_frame();
        Ok(())
    }

    /// Run frames until the backend asks to close, then tear it down.
    pub fn run(&mut self) -> Result<(), AppError> {
        match self.state {
            AppState::Uninitialized => return Err(AppError::NotInitialized),
            AppState::Closed => return Err(AppError::Closed),
            AppState::Initialized | AppState::Running => {}
        }
        while self.should_run() {
            self.run_frame()?;
        }
        self.close();
        Ok(())
    }

    /// Tear the backend down; later frames fail with [`AppError::Closed`].
    pub fn close(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.teardown();
            tracing::info!("closed application \"{}\"", self.config.title);
        }
        if self.state != AppState::Uninitialized {
            self.state = AppState::Closed;
        }
    }

    pub fn context(&self) -> Option<&egui::Context> {
        self.backend.as_deref().map(|backend| backend.context())
    }

    pub fn log_window(&self) -> &LogWindow {
        &self.log
    }

    /// A handle for logging from callbacks.
    pub fn logger(&self) -> Logger {
        self.log.logger()
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log.logger().info(message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log.logger().warn(message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log.logger().error(message);
    }

    fn backend_mut(&mut self) -> Result<&mut Box<dyn Backend>, AppError> {
        match self.state {
            AppState::Closed => Err(AppError::Closed),
            _ => self.backend.as_mut().ok_or(AppError::NotInitialized),
        }
    }

    pub fn load_texture(&mut self, name: &str, source: TextureSource) -> Result<Texture, AppError> {
        Ok(self.backend_mut()?.load_texture(name, source)?)
    }

    /// Decode an encoded image (PNG, JPEG) held in memory.
    pub fn load_texture_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<Texture, AppError> {
        self.load_texture(name, TextureSource::Encoded(bytes))
    }

    /// Load an image file; the path doubles as the texture name.
    pub fn load_texture_file(&mut self, path: impl AsRef<Path>) -> Result<Texture, AppError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        self.load_texture(&name, TextureSource::Path(path.to_path_buf()))
    }

    /// Register a font and return the family that selects it.
    pub fn register_font(
        &mut self,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<egui::FontFamily, AppError> {
        Ok(self.backend_mut()?.register_font(name, bytes)?)
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.close();
    }
}

/// Fluent construction of an [`Application`].
#[derive(Default)]
pub struct ApplicationBuilder {
    config: AppConfig,
    font: Option<Vec<u8>>,
    roots: Vec<AnyWidget>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.config.size = (width, height).into();
        self
    }

    pub fn with_log_size(mut self, width: f32, height: f32) -> Self {
        self.config.log.size = (width, height).into();
        self
    }

    pub fn with_log_position(mut self, x: f32, y: f32) -> Self {
        self.config.log.position = (x, y).into();
        self
    }

    /// TrueType/OpenType bytes used for all text.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(bytes);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.config.font_size = size;
        self
    }

    pub fn with_root(mut self, widget: impl IntoAnyWidget) -> Self {
        self.roots.push(widget.into_any_widget());
        self
    }

    pub fn build(self) -> Application {
        let mut app = Application::new(self.config);
        app.font = self.font;
        app.roots = self.roots;
        app
    }
}
