//! Pump-driven event loop hosting a single window.
//!
//! winit normally owns the main loop; here the caller owns it instead and
//! asks the platform to drain pending OS events once per frame.

use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

use trellis_core::profiling::profile_function;

use crate::event::{Event, EventBatch, EventQueue};
use crate::window::{Window, WindowDescriptor};

/// Upper bound on pumps while waiting for the OS to hand us a window.
const STARTUP_PUMPS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop exited before a window could be created")]
    NoWindow,
}

struct PlatformHandler {
    descriptor: Option<WindowDescriptor>,
    window: Option<Window>,
    window_id: Option<WindowId>,
    error: Option<winit::error::OsError>,
    events: EventQueue,
    scale_factor: f64,
    close_requested: bool,
}

impl ApplicationHandler for PlatformHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(descriptor) = self.descriptor.take() else {
            return;
        };

        match Window::new(event_loop, descriptor) {
            Ok(window) => {
                tracing::debug!("created window {:?}", window.id());
                self.scale_factor = window.scale_factor();
                self.window_id = Some(window.id());
                self.window = Some(window);
            }
            Err(err) => self.error = Some(err),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window_id != Some(window_id) {
            return;
        }

        if let WindowEvent::ScaleFactorChanged { scale_factor, .. } = &event {
            self.scale_factor = *scale_factor;
        }

        if let Some(event) = Event::from_winit(event, self.scale_factor) {
            if matches!(event, Event::CloseRequested) {
                tracing::info!("Close requested for window {:?}", window_id);
                self.close_requested = true;
            }
            self.events.push(event);
        }
    }
}

/// Owns the winit event loop for the lifetime of the application.
pub struct Platform {
    event_loop: EventLoop<()>,
    handler: PlatformHandler,
    exited: bool,
}

impl Platform {
    /// Create the event loop and its window.
    ///
    /// Returns the window separately so the renderer can own its surface.
    pub fn new(descriptor: WindowDescriptor) -> Result<(Self, Window), PlatformError> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut handler = PlatformHandler {
            descriptor: Some(descriptor),
            window: None,
            window_id: None,
            error: None,
            events: EventQueue::new(),
            scale_factor: 1.0,
            close_requested: false,
        };

        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);
            if let Some(err) = handler.error.take() {
                return Err(err.into());
            }
            if let Some(window) = handler.window.take() {
                let platform = Self {
                    event_loop,
                    handler,
                    exited: false,
                };
                return Ok((platform, window));
            }
            if let PumpStatus::Exit(code) = status {
                tracing::error!("event loop exited with code {code} during startup");
                break;
            }
        }

        Err(PlatformError::NoWindow)
    }

    /// Drain OS events without blocking.
    pub fn pump(&mut self) -> EventBatch {
        profile_function!();
        if self.exited {
            return EventBatch::empty();
        }

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            tracing::debug!("event loop exited with code {code}");
            self.exited = true;
            self.handler.close_requested = true;
        }

        self.handler.events.drain()
    }

    /// Whether the window asked to close or the event loop has exited.
    pub fn should_close(&self) -> bool {
        self.handler.close_requested
    }

    /// Request the loop to stop after the current frame.
    pub fn request_close(&mut self) {
        self.handler.close_requested = true;
    }

    pub fn scale_factor(&self) -> f64 {
        self.handler.scale_factor
    }
}
