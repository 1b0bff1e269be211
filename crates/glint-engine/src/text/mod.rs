//! Font loading and text measurement.
//!
//! Glyph rasterization and atlas management live in `render`.

mod font_system;

pub use font_system::{system_font, FontId, FontLoadError, FontSystem, TextFormat};
