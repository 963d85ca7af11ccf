//! Tab bars and their pages.
//!
//! A [`TabBar`] opens a scope in egui's temporary data while its children
//! draw. Each [`TabPage`] registers its title in that scope and learns
//! whether it is the active page. Once the children are done the bar draws a
//! header per registered title into a strip it reserved up front, and stores
//! the selection under its own [`egui::Id`] for the next frame.
//!
//! A bar without an explicit id is keyed on its parent `Ui`, the page it sits
//! in when nested, and how many bars drew before it in that place. None of
//! these change when a sibling bar switches to a page with more or fewer
//! widgets.

use crate::container::{Children, impl_container};
use crate::widget::Widget;

fn scope_id() -> egui::Id {
    egui::Id::new("trellis::tab_scope")
}

/// Live registration state while a bar's children draw.
#[derive(Clone, Default)]
struct TabScope {
    bar: Option<egui::Id>,
    active: Option<String>,
    titles: Vec<String>,
}

/// Bars drawn so far in one place during the current pass.
#[derive(Clone, Copy, Default)]
struct BarCount {
    pass: u64,
    next: u64,
}

/// Identity for a bar created without [`TabBar::with_id`].
fn positional_id(ui: &egui::Ui) -> egui::Id {
    let pass = ui.ctx().cumulative_pass_nr();
    let parent = ui.id();
    ui.data_mut(|data| {
        let enclosing = data
            .get_temp::<TabScope>(scope_id())
            .map(|scope| (scope.bar, scope.active));
        let base = parent.with(("trellis::tab_bar", enclosing));
        let count = data.get_temp_mut_or_default::<BarCount>(base);
        if count.pass != pass {
            *count = BarCount { pass, next: 0 };
        }
        let ordinal = count.next;
        count.next += 1;
        base.with(ordinal)
    })
}

/// What a bar remembers between frames.
#[derive(Clone, Default, Debug, PartialEq)]
struct TabState {
    active: Option<String>,
    titles: Vec<String>,
}

impl TabState {
    /// The stored selection, unless last frame showed it no longer exists.
    fn resolve(&self) -> Option<String> {
        self.active
            .as_ref()
            .filter(|active| self.titles.is_empty() || self.titles.contains(active))
            .cloned()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TabBar {
    id_salt: Option<String>,
    children: Children,
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the bar a fixed identity instead of one derived from its
    /// position, so the selection can be read or set from outside.
    pub fn with_id(mut self, salt: impl Into<String>) -> Self {
        self.id_salt = Some(salt.into());
        self
    }

    /// The id of a bar created with [`with_id`](Self::with_id).
    pub fn id_for(salt: &str) -> egui::Id {
        egui::Id::new(("trellis::tab_bar", salt))
    }

    /// Title of the page that was active at the end of the last frame.
    pub fn active(ctx: &egui::Context, id: egui::Id) -> Option<String> {
        ctx.data(|data| data.get_temp::<TabState>(id))
            .and_then(|state| state.resolve())
    }

    /// Select a page by title from the next frame on.
    pub fn set_active(ctx: &egui::Context, id: egui::Id, title: impl Into<String>) {
        let title = title.into();
        ctx.data_mut(|data| {
            data.get_temp_mut_or_default::<TabState>(id).active = Some(title);
        });
    }
}

impl_container!(TabBar);

impl Widget for TabBar {
    fn draw(&self, ui: &mut egui::Ui) {
        let id = match &self.id_salt {
            Some(salt) => Self::id_for(salt),
            None => positional_id(ui),
        };
        let state = ui
            .data(|data| data.get_temp::<TabState>(id))
            .unwrap_or_default();

        let header_height = ui.spacing().interact_size.y;
        let (header_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), header_height),
            egui::Sense::hover(),
        );
        ui.separator();

        let outer = ui.data_mut(|data| {
            let outer = data.remove_temp::<TabScope>(scope_id());
            data.insert_temp(
                scope_id(),
                TabScope {
                    bar: Some(id),
                    active: state.resolve(),
                    titles: Vec::new(),
                },
            );
            outer
        });

        self.children.draw(ui);

        let scope = ui
            .data_mut(|data| {
                let scope = data.remove_temp::<TabScope>(scope_id());
                if let Some(outer) = outer {
                    data.insert_temp(scope_id(), outer);
                }
                scope
            })
            .unwrap_or_default();

        let mut clicked = None;
        let mut header_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(header_rect)
                .layout(egui::Layout::left_to_right(egui::Align::Center)),
        );
        for title in &scope.titles {
            let selected = scope.active.as_ref() == Some(title);
            if header_ui.selectable_label(selected, title.as_str()).clicked() {
                clicked = Some(title.clone());
            }
        }

        let active = clicked
            .or_else(|| scope.active.filter(|active| scope.titles.contains(active)))
            .or_else(|| scope.titles.first().cloned());
        let next = TabState {
            active,
            titles: scope.titles,
        };
        ui.data_mut(|data| data.insert_temp(id, next));
    }
}

/// One page of a [`TabBar`].
///
/// Outside a tab bar the page simply draws its children.
#[derive(Clone, Debug)]
pub struct TabPage {
    title: String,
    children: Children,
}

impl TabPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Children::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Register with the enclosing bar, if any, and report visibility.
    fn register(&self, ui: &egui::Ui) -> bool {
        ui.data_mut(|data| {
            let Some(mut scope) = data.get_temp::<TabScope>(scope_id()) else {
                return true;
            };
            // without a stored selection the first page to register wins
            let active = match &scope.active {
                Some(active) => *active == self.title,
                None => scope.titles.is_empty(),
            };
            if active && scope.active.is_none() {
                scope.active = Some(self.title.clone());
            }
            scope.titles.push(self.title.clone());
            data.insert_temp(scope_id(), scope);
            active
        })
    }
}

impl_container!(TabPage);

impl Widget for TabPage {
    fn draw(&self, ui: &mut egui::Ui) {
        if self.register(ui) {
            self.children.draw(ui);
        }
    }
}
