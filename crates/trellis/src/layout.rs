use crate::container::{Children, impl_container};
use crate::widget::Widget;

/// Lays its children out left to right on one line.
#[derive(Clone, Default, Debug)]
pub struct Row {
    children: Children,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_container!(Row);

impl Widget for Row {
    fn draw(&self, ui: &mut egui::Ui) {
        if self.children.is_empty() {
            return;
        }
        ui.horizontal(|ui| self.children.draw(ui));
    }
}

/// Draws every child from the same origin, later children on top.
///
/// The parent cursor moves past the union of what the children used.
#[derive(Clone, Default, Debug)]
pub struct Stack {
    children: Children,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_container!(Stack);

impl Widget for Stack {
    fn draw(&self, ui: &mut egui::Ui) {
        let origin = ui.cursor().min;
        let region = egui::Rect::from_min_max(origin, ui.max_rect().max.max(origin));
        let layout = *ui.layout();

        let mut used: Option<egui::Rect> = None;
        for child in self.children.iter() {
            let mut child_ui = ui.new_child(egui::UiBuilder::new().max_rect(region).layout(layout));
            child.draw(&mut child_ui);
            let rect = child_ui.min_rect();
            used = Some(used.map_or(rect, |used| used.union(rect)));
        }

        if let Some(rect) = used {
            ui.advance_cursor_after_rect(rect);
        }
    }
}
