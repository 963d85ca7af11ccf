use trellis_core::geometry::{LogicalPosition, PhysicalPosition, PhysicalSize};
pub use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent as WinitEvent};
pub use winit::keyboard::*;

use std::collections::VecDeque;

/// Per-window event queue.
///
/// Close/resize/focus events jump ahead of ordinary input, and pointer motion
/// is coalesced so only the latest position of a frame survives.
pub struct EventQueue {
    pending: VecDeque<Event>,
    priority: VecDeque<Event>,
    latest_mouse_pos: Option<LogicalPosition<f64>>,
    latest_scale_factor: Option<f64>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(64),
            priority: VecDeque::with_capacity(8),
            latest_mouse_pos: None,
            latest_scale_factor: None,
        }
    }

    pub fn push(&mut self, event: Event) {
        match event {
            Event::CloseRequested | Event::WindowResized(_) | Event::Focused(_) => {
                self.priority.push_back(event);
            }
            Event::MouseMoved(pos) => {
                self.latest_mouse_pos = Some(pos);
            }
            Event::ScaleFactorChanged(scale) => {
                self.latest_scale_factor = Some(scale);
            }
            _ => {
                self.pending.push_back(event);
            }
        }
    }

    /// Take everything queued since the last drain.
    ///
    /// The pointer position is emitted before buttons so a press lands where
    /// the cursor ended up this frame.
    pub fn drain(&mut self) -> EventBatch {
        let mut events = Vec::with_capacity(self.priority.len() + self.pending.len() + 2);

        events.extend(self.priority.drain(..));

        if let Some(scale) = self.latest_scale_factor.take() {
            events.push(Event::ScaleFactorChanged(scale));
        }
        if let Some(pos) = self.latest_mouse_pos.take() {
            events.push(Event::MouseMoved(pos));
        }

        events.extend(self.pending.drain(..));

        EventBatch { events }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
            && self.priority.is_empty()
            && self.latest_mouse_pos.is_none()
            && self.latest_scale_factor.is_none()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct EventBatch {
    events: Vec<Event>,
}

impl EventBatch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Offer every event to `handler`, dropping the ones it consumes.
    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&Event) -> HandleStatus,
    {
        self.events.retain(|event| !handler(event).is_consumed());
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Window moved to a new physical position.
    WindowMoved(PhysicalPosition<i32>),
    /// Window resized; carries the new surface size in device pixels.
    WindowResized(PhysicalSize<u32>),
    ScaleFactorChanged(f64),
    Focused(bool),
    CloseRequested,
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    MouseScrolled(MouseScrollDelta),
    /// Cursor moved (logical coordinates).
    MouseMoved(LogicalPosition<f64>),
    MouseEntered,
    MouseLeft,
    KeyInput(KeyEvent),
    ModifiersChanged(ModifiersState),
}

#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub physical_key: PhysicalKey,
    pub logical_key: Key,
    pub text: Option<SmolStr>,
    pub location: KeyLocation,
    pub state: ElementState,
    pub repeat: bool,
    pub is_synthetic: bool,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b00000001;
        const CONSUMED = 0b00000010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}

impl Event {
    pub(crate) fn from_winit(event: WinitEvent, scale_factor: f64) -> Option<Self> {
        match event {
            WinitEvent::Moved(pos) => Some(Event::WindowMoved(PhysicalPosition::new(pos.x, pos.y))),
            WinitEvent::Resized(size) => Some(Event::WindowResized(PhysicalSize::new(
                size.width,
                size.height,
            ))),
            WinitEvent::ScaleFactorChanged { scale_factor, .. } => {
                Some(Event::ScaleFactorChanged(scale_factor))
            }
            WinitEvent::Focused(focus) => Some(Event::Focused(focus)),
            WinitEvent::CloseRequested => Some(Event::CloseRequested),
            WinitEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => Some(Event::MouseButtonDown(button)),
                ElementState::Released => Some(Event::MouseButtonUp(button)),
            },
            WinitEvent::MouseWheel { delta, .. } => Some(Event::MouseScrolled(delta)),
            WinitEvent::CursorMoved { position, .. } => Some(Event::MouseMoved(
                LogicalPosition::new(position.x / scale_factor, position.y / scale_factor),
            )),
            WinitEvent::CursorEntered { .. } => Some(Event::MouseEntered),
            WinitEvent::CursorLeft { .. } => Some(Event::MouseLeft),
            WinitEvent::ModifiersChanged(modifiers) => {
                Some(Event::ModifiersChanged(modifiers.state()))
            }
            WinitEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => Some(Event::KeyInput(KeyEvent {
                physical_key: event.physical_key,
                logical_key: event.logical_key,
                location: event.location,
                repeat: event.repeat,
                text: event.text,
                state: event.state,
                is_synthetic,
            })),
            // redraws are driven by the frame loop, not by the OS
            WinitEvent::RedrawRequested | WinitEvent::TouchpadPressure { .. } => None,
            unknown => {
                tracing::trace!("unhandled window event: {:?}", unknown);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_events_come_first() {
        let mut queue = EventQueue::new();
        queue.push(Event::MouseButtonDown(MouseButton::Left));
        queue.push(Event::CloseRequested);

        let batch = queue.drain();
        let events: Vec<_> = batch.iter().collect();
        assert!(matches!(events[0], Event::CloseRequested));
        assert!(matches!(events[1], Event::MouseButtonDown(MouseButton::Left)));
    }

    #[test]
    fn test_mouse_motion_is_coalesced() {
        let mut queue = EventQueue::new();
        queue.push(Event::MouseMoved(LogicalPosition::new(1.0, 1.0)));
        queue.push(Event::MouseMoved(LogicalPosition::new(5.0, 7.0)));
        queue.push(Event::MouseButtonDown(MouseButton::Left));

        let batch = queue.drain();
        assert_eq!(batch.len(), 2);
        match batch.iter().next() {
            Some(Event::MouseMoved(pos)) => assert_eq!(*pos, LogicalPosition::new(5.0, 7.0)),
            other => panic!("expected coalesced motion, got {other:?}"),
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dispatch_drops_consumed() {
        let mut queue = EventQueue::new();
        queue.push(Event::MouseEntered);
        queue.push(Event::MouseLeft);
        let mut batch = queue.drain();

        batch.dispatch(|event| match event {
            Event::MouseEntered => HandleStatus::consumed(),
            _ => HandleStatus::handled(),
        });

        assert_eq!(batch.len(), 1);
        assert!(matches!(batch.iter().next(), Some(Event::MouseLeft)));
    }
}
