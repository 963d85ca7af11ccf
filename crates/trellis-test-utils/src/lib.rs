//! Test utilities for Trellis.
//!
//! Widget trees are exercised against [`HeadlessBackend`], so the helpers
//! here are about scripting its input and observing side effects:
//!
//! - [`InputScript`] schedules pointer and keyboard events by frame index,
//!   or clicks on text painted by an earlier frame
//! - [`run_frames`] drives a backend without an application
//! - [`CallLog`] records callback invocations in order
//! - [`DropProbe`] counts how many clones of a value have been dropped
//!
//! # Example
//!
//! ```rust
//! use trellis_egui::{HeadlessBackend, egui};
//! use trellis_test_utils::InputScript;
//!
//! let mut backend = HeadlessBackend::default();
//! InputScript::new()
//!     .click(1, egui::pos2(20.0, 20.0))
//!     .apply(&mut backend);
//! ```
//!
//! [`HeadlessBackend`]: trellis_egui::HeadlessBackend

mod probe;
mod script;

pub use probe::{CallLog, DropObserver, DropProbe};
pub use script::{InputScript, run_frames};
