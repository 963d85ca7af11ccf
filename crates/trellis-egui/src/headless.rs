//! A backend with no window and no GPU.
//!
//! Frames advance only when the caller asks for one, input comes from events
//! scheduled against frame indices, and each frame's output is tessellated
//! and summarised so tests can inspect it.

use std::collections::{BTreeMap, VecDeque};

use trellis_core::profiling::profile_function;

use crate::backend::{Backend, BackendError, Theme, configure_context};
use crate::fonts::FontRegistry;

/// Simulated time step between frames.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Frame summaries kept unless configured otherwise.
pub const DEFAULT_HISTORY: usize = 120;

#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen size in points.
    pub screen_size: egui::Vec2,
    pub pixels_per_point: f32,
    /// Close after this many frames.
    pub frame_limit: Option<u64>,
    pub theme: Theme,
    /// How many of the most recent frame summaries to keep.
    pub history: usize,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            screen_size: egui::vec2(800.0, 600.0),
            pixels_per_point: 1.0,
            frame_limit: None,
            theme: Theme::Dark,
            history: DEFAULT_HISTORY,
        }
    }
}

impl HeadlessConfig {
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn with_history(mut self, frames: usize) -> Self {
        self.history = frames;
        self
    }

    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = egui::vec2(width, height);
        self
    }
}

/// What one finished frame produced.
#[derive(Debug, Clone, Default)]
pub struct FrameSummary {
    pub frame: u64,
    /// Tessellated primitives, roughly one per draw call.
    pub primitives: usize,
    pub textures_set: usize,
    pub copied_text: Vec<String>,
    /// Every text run painted this frame with its screen rectangle.
    pub texts: Vec<(String, egui::Rect)>,
}

impl FrameSummary {
    /// Where `text` was painted, if it was painted as one run.
    pub fn text_rect(&self, text: &str) -> Option<egui::Rect> {
        self.texts
            .iter()
            .find(|(painted, _)| painted == text)
            .map(|(_, rect)| *rect)
    }
}

fn collect_texts(shape: &egui::Shape, clip: egui::Rect, out: &mut Vec<(String, egui::Rect)>) {
    match shape {
        egui::Shape::Vec(shapes) => {
            for shape in shapes {
                collect_texts(shape, clip, out);
            }
        }
        egui::Shape::Text(text) => {
            let rect = text.galley.rect.translate(text.pos.to_vec2());
            if clip.intersects(rect) {
                out.push((text.galley.text().to_string(), rect));
            }
        }
        _ => {}
    }
}

pub struct HeadlessBackend {
    context: egui::Context,
    config: HeadlessConfig,
    fonts: FontRegistry,
    next_frame: u64,
    scripted: BTreeMap<u64, Vec<egui::Event>>,
    frames: VecDeque<FrameSummary>,
    clipboard: Option<String>,
    close_requested: bool,
    torn_down: bool,
}

impl HeadlessBackend {
    pub fn new(config: HeadlessConfig) -> Self {
        let context = egui::Context::default();
        configure_context(&context, config.theme);
        Self {
            context,
            config,
            fonts: FontRegistry::new(),
            next_frame: 0,
            scripted: BTreeMap::new(),
            frames: VecDeque::new(),
            clipboard: None,
            close_requested: false,
            torn_down: false,
        }
    }

    /// Deliver `event` as input to frame `frame` (0-based).
    pub fn push_event(&mut self, frame: u64, event: egui::Event) {
        if frame < self.next_frame {
            tracing::warn!("event scheduled for past frame {frame} will never be delivered");
        }
        self.scripted.entry(frame).or_default().push(event);
    }

    /// Index of the next frame `begin_frame` will start.
    pub fn frame_index(&self) -> u64 {
        self.next_frame
    }

    /// The most recent frame summaries, oldest first.
    pub fn frames(&self) -> &VecDeque<FrameSummary> {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameSummary> {
        self.frames.back()
    }

    /// Where `text` was painted on the last finished frame.
    pub fn text_rect(&self, text: &str) -> Option<egui::Rect> {
        self.last_frame()?.text_rect(text)
    }

    /// Text most recently copied by the UI.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn screen_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, self.config.screen_size)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl Backend for HeadlessBackend {
    fn context(&self) -> &egui::Context {
        &self.context
    }

    fn should_close(&self) -> bool {
        self.torn_down
            || self.close_requested
            || self
                .config
                .frame_limit
                .is_some_and(|limit| self.next_frame >= limit)
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn begin_frame(&mut self) -> egui::RawInput {
        let frame = self.next_frame;
        self.next_frame += 1;

        let events = self.scripted.remove(&frame).unwrap_or_default();
        let mut input = egui::RawInput {
            screen_rect: Some(self.screen_rect()),
            time: Some(frame as f64 * FRAME_DT),
            predicted_dt: FRAME_DT as f32,
            focused: true,
            events,
            ..Default::default()
        };
        input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(self.config.pixels_per_point);
        input
    }

    fn end_frame(&mut self, output: egui::FullOutput) -> Result<(), BackendError> {
        profile_function!();

        let mut summary = FrameSummary {
            frame: self.next_frame.saturating_sub(1),
            textures_set: output.textures_delta.set.len(),
            ..Default::default()
        };

        for command in &output.platform_output.commands {
            if let egui::OutputCommand::CopyText(text) = command {
                summary.copied_text.push(text.clone());
                self.clipboard = Some(text.clone());
            }
        }

        for clipped in &output.shapes {
            collect_texts(&clipped.shape, clipped.clip_rect, &mut summary.texts);
        }
        summary.primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point)
            .len();

        if self.config.history == 0 {
            return Ok(());
        }
        while self.frames.len() >= self.config.history {
            self.frames.pop_front();
        }
        self.frames.push_back(summary);
        Ok(())
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        tracing::debug!("headless backend torn down after {} frames", self.next_frame);
        self.scripted.clear();
        self.torn_down = true;
    }

    fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }
}
