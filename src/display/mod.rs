//! Terminal display module
//!
//! Paints countdowns and notices as markdown with automatic TTY detection.

mod formatter;
mod surface;
mod terminal;

pub use surface::{SurfaceMode, TerminalSurface};
