//! Trellis - declarative widget composition over egui
//!
//! Interfaces are built once as a tree of plain widget values and drawn every
//! frame by an [`Application`]. Mutable state lives in [`Binding`]s shared
//! between the widgets that show it and the code that reacts to it.
//!
//! - **Widgets**: [`Widget`] and its type-erased holder [`AnyWidget`]
//! - **Layout**: [`Row`], [`Stack`], [`Window`], [`TabBar`] and [`TabPage`]
//! - **Controls**: buttons, checkboxes, numeric inputs and combo boxes
//! - **Logging**: [`LogWindow`], a filterable, timestamped in-app log
//!
//! # Quick Start
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     trellis::core::logging::init();
//!
//!     let clicks = Binding::new(String::from("never clicked"));
//!     let label = clicks.clone();
//!
//!     let mut app = Application::builder().with_title("Demo").build();
//!     app.init()?;
//!     app.add(
//!         Row::new()
//!             .add(ClickButton::new("Click", move || label.set("clicked".into())))
//!             .add(BoundLabel::new(clicks)),
//!     );
//!     app.run()
//! }
//! ```

pub mod application;
pub mod binding;
pub mod config;
pub mod container;
pub mod controls;
pub mod display;
pub mod error;
pub mod layout;
pub mod log;
pub mod memory_editor;
pub mod tabs;
pub mod widget;
pub mod window;

pub use trellis_core as core;
pub use trellis_egui as backend;

pub use egui;

pub use application::{AppState, Application, ApplicationBuilder};
pub use binding::Binding;
pub use config::{AppConfig, ConfigError, LogWindowConfig};
pub use container::Children;
pub use controls::{
    Checkbox, ClickButton, ComboBox, DoubleInput, IntInput, StateButton, format_double,
};
pub use display::{
    BoundLabel, FontText, FrameRateLabel, Image, Label, Separator, TextField, format_frame_rate,
};
pub use error::AppError;
pub use layout::{Row, Stack};
pub use log::{LogBuffer, LogFilter, LogLevel, LogWindow, Logger, format_log_line};
pub use memory_editor::{MemoryEditorWindow, SectorMemoryEditorWindow};
pub use tabs::{TabBar, TabPage};
pub use widget::{AnyWidget, IntoAnyWidget, Widget};
pub use window::Window;

pub use trellis_core::geometry::{Position, Size};
pub use trellis_egui::{
    Backend, BackendError, HeadlessBackend, HeadlessConfig, Texture, TextureSource, Theme,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::{AppState, Application, ApplicationBuilder};
    pub use crate::binding::Binding;
    pub use crate::config::AppConfig;
    pub use crate::error::AppError;
    pub use crate::widget::{AnyWidget, IntoAnyWidget, Widget};

    // Widgets
    pub use crate::controls::{Checkbox, ClickButton, ComboBox, DoubleInput, IntInput, StateButton};
    pub use crate::display::{
        BoundLabel, FontText, FrameRateLabel, Image, Label, Separator, TextField,
    };
    pub use crate::layout::{Row, Stack};
    pub use crate::log::{LogLevel, LogWindow, Logger};
    pub use crate::memory_editor::{MemoryEditorWindow, SectorMemoryEditorWindow};
    pub use crate::tabs::{TabBar, TabPage};
    pub use crate::window::Window;

    pub use trellis_core::geometry::{Position, Size};
    pub use trellis_egui::{Texture, TextureSource, Theme};
}
