//! The widget protocol and its type-erased holder.

use std::any::Any;
use std::fmt;

use trellis_core::geometry::{Position, Size};

/// Something that renders itself into an egui [`Ui`](egui::Ui) each frame.
///
/// Widgets are plain values: they are built once, stored in containers and
/// drawn every frame. Anything they need to change lives behind a
/// [`Binding`](crate::Binding).
pub trait Widget: Any {
    fn draw(&self, ui: &mut egui::Ui);
}

trait DynWidget: Any {
    fn draw(&self, ui: &mut egui::Ui);
    fn clone_box(&self) -> Box<dyn DynWidget>;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

impl<W: Widget + Clone> DynWidget for W {
    fn draw(&self, ui: &mut egui::Ui) {
        Widget::draw(self, ui);
    }

    fn clone_box(&self) -> Box<dyn DynWidget> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<W>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Owns one widget of any type.
///
/// Cloning deep-copies the held widget. [`take`](Self::take) moves it out and
/// leaves this holder empty; an empty holder draws nothing.
#[derive(Default)]
pub struct AnyWidget {
    inner: Option<Box<dyn DynWidget>>,
}

impl AnyWidget {
    pub fn new<W: Widget + Clone>(widget: W) -> Self {
        Self {
            inner: Some(Box::new(widget)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn draw(&self, ui: &mut egui::Ui) {
        if let Some(widget) = self.inner.as_deref() {
            widget.draw(ui);
        }
    }

    /// Move the widget into a new holder, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Type name of the held widget, for diagnostics.
    pub fn type_name(&self) -> Option<&'static str> {
        self.inner.as_deref().map(DynWidget::type_name)
    }

    pub fn is<W: Widget>(&self) -> bool {
        self.downcast_ref::<W>().is_some()
    }

    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        self.inner.as_deref()?.as_any().downcast_ref::<W>()
    }
}

impl Clone for AnyWidget {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.as_deref().map(DynWidget::clone_box),
        }
    }
}

impl fmt::Debug for AnyWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => f.debug_tuple("AnyWidget").field(&name).finish(),
            None => f.write_str("AnyWidget(<empty>)"),
        }
    }
}

/// Conversion accepted by every container's `add` and `push`.
pub trait IntoAnyWidget {
    fn into_any_widget(self) -> AnyWidget;
}

impl<W: Widget + Clone> IntoAnyWidget for W {
    fn into_any_widget(self) -> AnyWidget {
        AnyWidget::new(self)
    }
}

impl IntoAnyWidget for AnyWidget {
    fn into_any_widget(self) -> AnyWidget {
        self
    }
}

/// `None` when the hint leaves sizing to egui.
pub(crate) fn size_hint(size: Size) -> Option<egui::Vec2> {
    (!size.is_zero()).then(|| egui::vec2(size.width.max(0.0), size.height.max(0.0)))
}

pub(crate) fn to_pos2(position: Position) -> egui::Pos2 {
    egui::pos2(position.x, position.y)
}

/// Run `add_contents` with the cursor shifted by `offset`.
///
/// The parent advances past whatever the contents used.
pub(crate) fn offset_scope<R>(
    ui: &mut egui::Ui,
    offset: Position,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    if offset == Position::ORIGIN {
        return add_contents(ui);
    }
    let origin = ui.cursor().min + egui::vec2(offset.x, offset.y);
    let max = ui.max_rect().max.max(origin);
    ui.scope_builder(
        egui::UiBuilder::new().max_rect(egui::Rect::from_min_max(origin, max)),
        add_contents,
    )
    .inner
}
