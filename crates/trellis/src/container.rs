//! Ordered child lists shared by every composite widget.

use crate::widget::{AnyWidget, IntoAnyWidget};

/// Children in insertion order, which is also draw and layout order.
#[derive(Clone, Default, Debug)]
pub struct Children {
    widgets: Vec<AnyWidget>,
}

impl Children {
    pub fn push(&mut self, widget: impl IntoAnyWidget) {
        self.widgets.push(widget.into_any_widget());
    }

    pub fn draw(&self, ui: &mut egui::Ui) {
        for widget in &self.widgets {
            widget.draw(ui);
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnyWidget> {
        self.widgets.iter()
    }
}

/// Builder methods for a composite with a `children: Children` field.
macro_rules! impl_container {
    ($ty:ty) => {
        impl $ty {
            /// Append a child and return the container, for chained building.
            pub fn add(mut self, widget: impl $crate::widget::IntoAnyWidget) -> Self {
                self.children.push(widget);
                self
            }

            /// Append a child in place.
            pub fn push(&mut self, widget: impl $crate::widget::IntoAnyWidget) -> &mut Self {
                self.children.push(widget);
                self
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }

            pub fn children(&self) -> &$crate::container::Children {
                &self.children
            }
        }
    };
}

pub(crate) use impl_container;
