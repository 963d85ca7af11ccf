use std::sync::Arc;

use trellis_core::geometry::PhysicalSize;
use trellis_core::profiling::profile_function;
use trellis_winit::{WindowId, window::Window};

use crate::context::{GraphicsContext, GraphicsError};
use crate::frame::{Frame, FrameStats};

/// How a window's surface is configured.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    /// `None` picks the surface's preferred format without the sRGB suffix,
    /// which is what egui expects to draw into.
    pub format: Option<wgpu::TextureFormat>,
    pub vsync: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            format: None,
            vsync: true,
        }
    }
}

/// A window with the wgpu surface presenting into it.
pub struct RenderableWindow {
    window: Window,
    context: Arc<GraphicsContext>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    resize: Option<PhysicalSize<u32>>,
}

impl RenderableWindow {
    pub fn new(
        window: Window,
        context: Arc<GraphicsContext>,
        options: SurfaceOptions,
    ) -> Result<Self, GraphicsError> {
        let PhysicalSize { width, height } = window.physical_size();
        let surface = context.instance.create_surface(window.window.clone())?;

        let mut config = surface
            .get_default_config(&context.adapter, width.max(1), height.max(1))
            .ok_or_else(|| GraphicsError::UnsupportedSurface {
                adapter: context.info().name,
            })?;
        config.format = options
            .format
            .unwrap_or_else(|| config.format.remove_srgb_suffix());
        config.present_mode = match options.vsync {
            true => wgpu::PresentMode::AutoVsync,
            false => wgpu::PresentMode::AutoNoVsync,
        };
        surface.configure(&context.device, &config);

        tracing::debug!(
            "configured {width}x{height} surface as {:?}, {:?}",
            config.format,
            config.present_mode
        );

        Ok(Self {
            window,
            context,
            surface,
            config,
            resize: None,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn graphics_context(&self) -> &Arc<GraphicsContext> {
        &self.context
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Remember the new size; the surface follows before the next frame.
    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        self.resize = Some(size);
    }

    /// Acquire the next surface image.
    ///
    /// `None` means there is nothing to draw into this time round: the window
    /// is minimised, the surface had to be rebuilt, or acquisition timed out.
    pub fn begin_drawing(&mut self) -> Option<Frame> {
        profile_function!();

        if let Some(size) = self.resize.take() {
            self.config.width = size.width;
            self.config.height = size.height;
            if !size.is_empty() {
                self.surface.configure(&self.context.device, &self.config);
            }
        }
        if self.config.width == 0 || self.config.height == 0 {
            return None;
        }

        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.context.device, &self.config);
                return None;
            }
            Err(err) => {
                tracing::warn!("skipping frame: {err}");
                return None;
            }
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trellis frame"),
            });

        Some(Frame {
            context: self.context.clone(),
            texture,
            view,
            encoder,
            size: [self.config.width, self.config.height],
            stats: FrameStats::default(),
        })
    }
}
