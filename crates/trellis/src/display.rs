//! Read-only leaves.

use trellis_core::geometry::{Position, Size};
use trellis_egui::Texture;

use crate::binding::Binding;
use crate::widget::{Widget, offset_scope, size_hint};

#[derive(Clone, Debug)]
pub struct Label {
    text: String,
    size: Size,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: Size::ZERO,
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

impl Widget for Label {
    fn draw(&self, ui: &mut egui::Ui) {
        let label = egui::Label::new(self.text.as_str());
        match size_hint(self.size) {
            Some(size) => ui.add_sized(size, label),
            None => ui.add(label),
        };
    }
}

/// A label showing the current contents of a bound string.
#[derive(Clone, Debug)]
pub struct BoundLabel {
    text: Binding<String>,
}

impl BoundLabel {
    pub fn new(text: Binding<String>) -> Self {
        Self { text }
    }
}

impl Widget for BoundLabel {
    fn draw(&self, ui: &mut egui::Ui) {
        self.text.with(|text| ui.label(text.as_str()));
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Separator;

impl Widget for Separator {
    fn draw(&self, ui: &mut egui::Ui) {
        ui.separator();
    }
}

/// Shows the smoothed frame rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRateLabel;

pub fn format_frame_rate(frame_seconds: f32) -> String {
    let fps = if frame_seconds > 0.0 {
        1.0 / frame_seconds
    } else {
        0.0
    };
    format!("Application average {fps:.1} FPS")
}

impl Widget for FrameRateLabel {
    fn draw(&self, ui: &mut egui::Ui) {
        let dt = ui.input(|input| input.stable_dt);
        ui.label(format_frame_rate(dt));
    }
}

/// Static text placed at an offset from the cursor.
#[derive(Clone, Debug)]
pub struct TextField {
    text: String,
    offset: Position,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: Position::ORIGIN,
        }
    }

    pub fn with_offset(mut self, offset: impl Into<Position>) -> Self {
        self.offset = offset.into();
        self
    }
}

impl Widget for TextField {
    fn draw(&self, ui: &mut egui::Ui) {
        offset_scope(ui, self.offset, |ui| ui.label(self.text.as_str()));
    }
}

/// Text in a custom font.
///
/// The family must come from a font registered before the first frame, see
/// [`Application::register_font`](crate::Application::register_font); egui
/// panics on families it has never heard of.
#[derive(Clone, Debug)]
pub struct FontText {
    text: String,
    family: egui::FontFamily,
    size: f32,
    letter_spacing: f32,
    offset: Position,
}

impl FontText {
    pub fn new(text: impl Into<String>, family: egui::FontFamily, size: f32) -> Self {
        Self {
            text: text.into(),
            family,
            size,
            letter_spacing: 0.0,
            offset: Position::ORIGIN,
        }
    }

    /// Extra horizontal space after every glyph, in points.
    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn with_offset(mut self, offset: impl Into<Position>) -> Self {
        self.offset = offset.into();
        self
    }
}

impl Widget for FontText {
    fn draw(&self, ui: &mut egui::Ui) {
        let text = egui::RichText::new(self.text.as_str())
            .family(self.family.clone())
            .size(self.size)
            .extra_letter_spacing(self.letter_spacing);
        offset_scope(ui, self.offset, |ui| ui.label(text));
    }
}

/// A loaded texture at its natural size, optionally behind a visibility flag.
#[derive(Clone, Debug)]
pub struct Image {
    texture: Texture,
    show: Option<Binding<bool>>,
    size: Size,
}

impl Image {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            show: None,
            size: Size::ZERO,
        }
    }

    /// Draw only while `show` is true.
    pub fn with_visibility(mut self, show: Binding<bool>) -> Self {
        self.show = Some(show);
        self
    }

    /// Scale to `size` instead of the texture's own.
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

impl Widget for Image {
    fn draw(&self, ui: &mut egui::Ui) {
        if let Some(show) = &self.show
            && !show.get()
        {
            return;
        }
        let size = size_hint(self.size).unwrap_or_else(|| self.texture.size_vec2());
        ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
            self.texture.id(),
            size,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_text() {
        assert_eq!(format_frame_rate(0.02), "Application average 50.0 FPS");
        assert_eq!(format_frame_rate(0.0), "Application average 0.0 FPS");
    }
}
