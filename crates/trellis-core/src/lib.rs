//! Trellis Core
//!
//! Shared foundations for the Trellis crates: logging bootstrap, profiling
//! hooks and the small geometry vocabulary used by windows and widgets.

pub mod geometry;
pub mod logging;
pub mod profiling;
