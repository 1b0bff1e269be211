//! GPU rendering of recorded draw lists.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - vertex shaders convert to NDC using a viewport uniform
//! - colors are linear premultiplied RGBA

mod common;
mod device;
mod glyph;
mod renderer;
mod shape;
mod tessellate;

pub use device::{GraphicsDevice, WgpuDevice};
