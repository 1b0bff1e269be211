//! Immediate-mode 2D drawing.
//!
//! Responsibilities:
//! - store renderer-agnostic primitives in call order (`DrawList`)
//! - expose a scoped recording context (`Canvas`) to game draw hooks
//!
//! Coordinates are logical pixels, top-left origin, +Y down. Rotation angles are degrees,
//! clockwise on screen.

mod canvas;
mod cmd;
mod list;

pub use canvas::Canvas;
pub use cmd::{Primitive, Rotation, Stroke, StrokeStyle, TextCmd};
pub use list::{DrawItem, DrawList};
