use trellis_egui::{Backend, HeadlessBackend, egui};

/// Input events keyed by the frame that should see them.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<(u64, egui::Event)>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, frame: u64, event: egui::Event) -> Self {
        self.events.push((frame, event));
        self
    }

    pub fn move_to(self, frame: u64, pos: egui::Pos2) -> Self {
        self.event(frame, egui::Event::PointerMoved(pos))
    }

    pub fn press(self, frame: u64, pos: egui::Pos2) -> Self {
        self.event(frame, pointer_button(pos, true))
    }

    pub fn release(self, frame: u64, pos: egui::Pos2) -> Self {
        self.event(frame, pointer_button(pos, false))
    }

    /// Move and press on `frame`, release on the frame after.
    ///
    /// egui reports the click on the release frame.
    pub fn click(self, frame: u64, pos: egui::Pos2) -> Self {
        self.move_to(frame, pos)
            .press(frame, pos)
            .release(frame + 1, pos)
    }

    /// Click the centre of `label` as painted on the backend's last frame,
    /// starting with the frame it runs next.
    ///
    /// # Panics
    ///
    /// If `label` was not painted as a single text run.
    pub fn click_label(self, backend: &HeadlessBackend, label: &str) -> Self {
        let rect = backend
            .text_rect(label)
            .unwrap_or_else(|| panic!("{label:?} is not on screen"));
        self.click(backend.frame_index(), rect.center())
    }

    pub fn text(self, frame: u64, text: &str) -> Self {
        self.event(frame, egui::Event::Text(text.to_string()))
    }

    pub fn key(self, frame: u64, key: egui::Key) -> Self {
        let press = egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        let release = egui::Event::Key {
            key,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        self.event(frame, press).event(frame, release)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn apply(self, backend: &mut HeadlessBackend) {
        for (frame, event) in self.events {
            backend.push_event(frame, event);
        }
    }
}

/// Run `frames` frames of `ui` on `backend`.
///
/// # Panics
///
/// If the backend fails to finish a frame.
pub fn run_frames(backend: &mut HeadlessBackend, frames: usize, mut ui: impl FnMut(&egui::Context)) {
    for _ in 0..frames {
        let input = backend.begin_frame();
        let output = backend.context().clone().run(input, &mut ui);
        if let Err(err) = backend.end_frame(output) {
            panic!("frame {} failed: {err}", backend.frame_index() - 1);
        }
    }
}

fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}
