use trellis_core::geometry::{Position, Size};

use crate::container::{Children, impl_container};
use crate::widget::{Widget, size_hint, to_pos2};

/// A floating window holding its children.
///
/// Size and position are first-use hints: once the user moves or resizes
/// the window egui remembers that instead. The title doubles as the window's
/// identity, so two windows must not share one.
#[derive(Clone, Debug)]
pub struct Window {
    title: String,
    size: Size,
    position: Position,
    children: Children,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: Size::ZERO,
            position: Position::ORIGIN,
            children: Children::default(),
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Show the window directly on a context, outside any panel.
    pub fn show(&self, ctx: &egui::Context) {
        first_use_window(&self.title, self.size, self.position)
            .show(ctx, |ui| self.children.draw(ui));
    }
}

impl_container!(Window);

impl Widget for Window {
    fn draw(&self, ui: &mut egui::Ui) {
        self.show(ui.ctx());
    }
}

/// An `egui::Window` with default size and position hints applied.
pub(crate) fn first_use_window<'a>(
    title: &str,
    size: Size,
    position: Position,
) -> egui::Window<'a> {
    let window = egui::Window::new(title).default_pos(to_pos2(position));
    match size_hint(size) {
        Some(size) => window.default_size(size),
        None => window,
    }
}
