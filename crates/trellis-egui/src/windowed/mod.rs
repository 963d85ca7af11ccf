//! egui on a winit window, rendered through wgpu.

mod clipboard;
mod state;

use std::sync::Arc;

use trellis_core::geometry::{LogicalSize, Size};
use trellis_core::profiling::{profile_function, profile_scope};
use trellis_render::{
    GraphicsContext, GraphicsContextDescriptor, RenderableWindow, SurfaceOptions, wgpu,
};
use trellis_winit::{FramePacer, Platform, TimeTracker};
use trellis_winit::event::{Event, HandleStatus};
use trellis_winit::window::WindowDescriptor;

use crate::backend::{Backend, BackendError, Theme, configure_context};
use crate::fonts::FontRegistry;
use clipboard::Clipboard;
use state::InputState;

#[derive(Debug, Clone)]
pub struct WindowedConfig {
    pub title: String,
    /// Inner size in logical points.
    pub size: Size,
    pub vsync: bool,
    /// Colour the surface is cleared to before egui draws, linear RGBA.
    pub clear_color: [f32; 4],
    pub theme: Theme,
    /// Frame cap applied when vsync is off.
    pub target_fps: Option<f32>,
}

impl Default for WindowedConfig {
    fn default() -> Self {
        Self {
            title: "Trellis".to_string(),
            size: Size::new(1280.0, 720.0),
            vsync: true,
            clear_color: [0.1, 0.1, 0.1, 1.0],
            theme: Theme::Dark,
            target_fps: None,
        }
    }
}

/// GPU-side state, dropped on teardown.
struct Gpu {
    window: RenderableWindow,
    renderer: egui_wgpu::Renderer,
}

pub struct WindowedBackend {
    platform: Platform,
    gpu: Option<Gpu>,
    context: egui::Context,
    input: InputState,
    clipboard: Clipboard,
    fonts: FontRegistry,
    clear_color: wgpu::Color,
    time: TimeTracker,
    pacer: FramePacer,
}

impl WindowedBackend {
    /// Open the window and bring up the GPU.
    pub fn new(config: WindowedConfig) -> Result<Self, BackendError> {
        profile_function!();

        let (platform, window) = Platform::new(WindowDescriptor {
            title: config.title.clone(),
            size: Some(LogicalSize::new(
                config.size.width as f64,
                config.size.height as f64,
            )),
            ..Default::default()
        })?;

        let graphics = GraphicsContext::new_owned_sync(GraphicsContextDescriptor::new())?;
        let scale_factor = window.scale_factor() as f32;
        let window = RenderableWindow::new(
            window,
            graphics.clone(),
            SurfaceOptions {
                vsync: config.vsync,
                ..Default::default()
            },
        )?;

        let renderer = egui_wgpu::Renderer::new(
            graphics.device(),
            window.format(),
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        let context = egui::Context::default();
        configure_context(&context, config.theme);

        let [r, g, b, a] = config.clear_color.map(f64::from);
        tracing::info!("opened window \"{}\" ({:?})", config.title, window.id());

        Ok(Self {
            platform,
            gpu: Some(Gpu { window, renderer }),
            context,
            input: InputState::new(scale_factor),
            clipboard: Clipboard::new(),
            fonts: FontRegistry::new(),
            clear_color: wgpu::Color { r, g, b, a },
            time: TimeTracker::new(),
            pacer: FramePacer::new(if config.vsync { None } else { config.target_fps }),
        })
    }

    pub fn graphics_context(&self) -> Option<&Arc<GraphicsContext>> {
        self.gpu.as_ref().map(|gpu| gpu.window.graphics_context())
    }

    fn render(&mut self, output: egui::FullOutput) {
        profile_function!();
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let graphics = gpu.window.graphics_context().clone();

        // textures must be uploaded even when this frame is skipped
        for (id, delta) in &output.textures_delta.set {
            gpu.renderer
                .update_texture(graphics.device(), graphics.queue(), *id, delta);
        }

        if let Some(mut frame) = gpu.window.begin_drawing() {
            let tris = self
                .context
                .tessellate(output.shapes, output.pixels_per_point);
            let screen = egui_wgpu::ScreenDescriptor {
                size_in_pixels: frame.size(),
                pixels_per_point: output.pixels_per_point,
            };

            let callbacks = gpu.renderer.update_buffers(
                graphics.device(),
                graphics.queue(),
                frame.encoder(),
                &tris,
                &screen,
            );
            {
                profile_scope!("egui_pass");
                let mut pass = frame.clear_pass("egui", self.clear_color);
                gpu.renderer.render(&mut pass, &tris, &screen);
            }
            frame.record_draw();

            let stats = frame.present(callbacks);
            tracing::trace!("presented {} pass(es), {} draw(s)", stats.passes, stats.draw_calls);
        }

        for id in &output.textures_delta.free {
            gpu.renderer.free_texture(id);
        }
    }
}

impl Backend for WindowedBackend {
    fn context(&self) -> &egui::Context {
        &self.context
    }

    fn should_close(&self) -> bool {
        self.gpu.is_none() || self.platform.should_close()
    }

    fn request_close(&mut self) {
        self.platform.request_close();
    }

    fn begin_frame(&mut self) -> egui::RawInput {
        profile_function!();
        self.pacer.begin();
        let frame_time = self.time.tick();
        let mut events = self.platform.pump();
        let Some(gpu) = self.gpu.as_mut() else {
            return egui::RawInput::default();
        };

        let context = &self.context;
        let input = &mut self.input;
        let clipboard = &mut self.clipboard;
        events.dispatch(|event| {
            if let Event::WindowResized(size) = event {
                gpu.window.resized(*size);
                return HandleStatus::handled();
            }
            input.on_event(context, &gpu.window, clipboard, event)
        });

        let mut input = self.input.take_input(&self.context, &gpu.window);
        input.time = Some(frame_time.elapsed_seconds());
        input
    }

    fn end_frame(&mut self, output: egui::FullOutput) -> Result<(), BackendError> {
        for command in &output.platform_output.commands {
            if let egui::OutputCommand::CopyText(text) = command {
                self.clipboard.set(text.clone());
            }
        }
        self.render(output);
        self.pacer.wait();
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            tracing::info!("closing window {:?}", gpu.window.id());
            self.platform.request_close();
            drop(gpu);
        }
    }

    fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }
}

impl Drop for WindowedBackend {
    fn drop(&mut self) {
        self.teardown();
    }
}
