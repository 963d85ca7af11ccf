//! Interactive leaves bound to caller state.

use std::fmt;
use std::rc::Rc;

use trellis_core::geometry::{Position, Size};

use crate::binding::Binding;
use crate::widget::{Widget, offset_scope, size_hint};

fn add_sized(ui: &mut egui::Ui, size: Size, widget: impl egui::Widget) -> egui::Response {
    match size_hint(size) {
        Some(size) => ui.add_sized(size, widget),
        None => ui.add(widget),
    }
}

/// A button that runs a callback when clicked.
#[derive(Clone)]
pub struct ClickButton {
    text: String,
    on_click: Rc<dyn Fn()>,
    size: Size,
}

impl ClickButton {
    pub fn new(text: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self {
            text: text.into(),
            on_click: Rc::new(on_click),
            size: Size::ZERO,
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

impl fmt::Debug for ClickButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickButton").field("text", &self.text).finish_non_exhaustive()
    }
}

impl Widget for ClickButton {
    fn draw(&self, ui: &mut egui::Ui) {
        if add_sized(ui, self.size, egui::Button::new(self.text.as_str())).clicked() {
            (self.on_click)();
        }
    }
}

/// A button whose bound flag is true exactly while it is held down.
#[derive(Clone, Debug)]
pub struct StateButton {
    text: String,
    pressed: Binding<bool>,
    size: Size,
}

impl StateButton {
    pub fn new(text: impl Into<String>, pressed: Binding<bool>) -> Self {
        Self {
            text: text.into(),
            pressed,
            size: Size::ZERO,
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

impl Widget for StateButton {
    fn draw(&self, ui: &mut egui::Ui) {
        let response = add_sized(ui, self.size, egui::Button::new(self.text.as_str()));
        self.pressed.set(response.is_pointer_button_down_on());
    }
}

#[derive(Clone, Debug)]
pub struct Checkbox {
    text: String,
    checked: Binding<bool>,
}

impl Checkbox {
    pub fn new(text: impl Into<String>, checked: Binding<bool>) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

impl Widget for Checkbox {
    fn draw(&self, ui: &mut egui::Ui) {
        self.checked
            .with_mut(|checked| ui.checkbox(checked, self.text.as_str()));
    }
}

/// An integer editor that keeps its bound value inside `[min, max]`.
///
/// A value written from outside the range is pulled back in on the next draw.
#[derive(Clone, Debug)]
pub struct IntInput {
    label: String,
    value: Binding<i32>,
    min: i32,
    max: i32,
    offset: Position,
}

impl IntInput {
    pub fn new(label: impl Into<String>, value: Binding<i32>) -> Self {
        Self {
            label: label.into(),
            value,
            min: 0,
            max: i32::MAX,
            offset: Position::ORIGIN,
        }
    }

    pub fn with_range(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Shift the editor away from the cursor.
    pub fn with_offset(mut self, offset: impl Into<Position>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// `value` limited to the range; an inverted range yields `max`.
    pub fn clamp(&self, value: i32) -> i32 {
        value.max(self.min).min(self.max)
    }
}

impl Widget for IntInput {
    fn draw(&self, ui: &mut egui::Ui) {
        let mut value = self.clamp(self.value.get());
        offset_scope(ui, self.offset, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut value).range(self.min..=self.max));
                ui.label(self.label.as_str());
            });
        });
        self.value.set(self.clamp(value));
    }
}

/// A floating-point editor showing the value as `000.000`.
#[derive(Clone, Debug)]
pub struct DoubleInput {
    label: String,
    value: Binding<f64>,
    size: Size,
}

impl DoubleInput {
    pub fn new(label: impl Into<String>, value: Binding<f64>) -> Self {
        Self {
            label: label.into(),
            value,
            size: Size::ZERO,
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

/// Zero-padded to seven characters with three decimals.
pub fn format_double(value: f64) -> String {
    format!("{value:07.3}")
}

impl Widget for DoubleInput {
    fn draw(&self, ui: &mut egui::Ui) {
        self.value.with_mut(|value| {
            ui.horizontal(|ui| {
                let editor = egui::DragValue::new(value)
                    .speed(0.01)
                    .custom_formatter(|value, _| format_double(value));
                add_sized(ui, self.size, editor);
                ui.label(self.label.as_str());
            });
        });
    }
}

/// A drop-down choosing one string from a bound list.
///
/// Choosing an entry overwrites the bound current value with it. A current
/// value missing from the list is shown as is and left alone.
#[derive(Clone, Debug)]
pub struct ComboBox {
    label: String,
    options: Binding<Vec<String>>,
    current: Binding<String>,
    width: Option<f32>,
}

impl ComboBox {
    pub fn new(
        label: impl Into<String>,
        options: Binding<Vec<String>>,
        current: Binding<String>,
    ) -> Self {
        Self {
            label: label.into(),
            options,
            current,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Position of the current value in the option list.
    pub fn selected_index(&self) -> Option<usize> {
        let current = self.current.get();
        self.options
            .with(|options| options.iter().position(|option| *option == current))
    }

    /// Make entry `index` current; false if there is no such entry.
    pub fn choose(&self, index: usize) -> bool {
        match self.options.with(|options| options.get(index).cloned()) {
            Some(option) => {
                self.current.set(option);
                true
            }
            None => false,
        }
    }
}

impl Widget for ComboBox {
    fn draw(&self, ui: &mut egui::Ui) {
        let current = self.current.get();
        let mut chosen = None;

        let mut combo = egui::ComboBox::from_label(self.label.as_str()).selected_text(current.as_str());
        if let Some(width) = self.width {
            combo = combo.width(width);
        }
        combo.show_ui(ui, |ui| {
            self.options.with(|options| {
                for option in options {
                    if ui.selectable_label(*option == current, option.as_str()).clicked() {
                        chosen = Some(option.clone());
                    }
                }
            });
        });

        if let Some(option) = chosen {
            self.current.set(option);
        }
    }
}
