use std::sync::Arc;

use trellis_core::geometry::{LogicalSize, PhysicalSize};
use winit::{error::OsError, event_loop::ActiveEventLoop};

#[derive(Debug, Clone)]
pub struct WindowDescriptor {
    pub title: String,
    pub resizable: bool,
    /// Inner size in logical points; `None` lets the OS decide.
    pub size: Option<LogicalSize<f64>>,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Trellis".to_string(),
            resizable: true,
            size: None,
        }
    }
}

/// Handle to the OS window. Clones refer to the same window.
#[derive(Clone)]
pub struct Window {
    pub window: Arc<winit::window::Window>,
}

impl Window {
    pub(crate) fn new(
        event_loop: &ActiveEventLoop,
        descriptor: WindowDescriptor,
    ) -> Result<Self, OsError> {
        let mut attributes = winit::window::Window::default_attributes()
            .with_title(descriptor.title)
            .with_resizable(descriptor.resizable);
        if let Some(LogicalSize { width, height }) = descriptor.size {
            attributes = attributes.with_inner_size(winit::dpi::LogicalSize::new(width, height));
        }

        Ok(Self {
            window: Arc::new(event_loop.create_window(attributes)?),
        })
    }

    pub fn id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    /// Inner size in device pixels.
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        let inner = self.window.inner_size();
        PhysicalSize::new(inner.width, inner.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }
}
