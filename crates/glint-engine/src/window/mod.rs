//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the frame loop and the
//! graphics device.

mod config;
mod resize;
mod runtime;

pub use config::WindowConfig;
pub use resize::ResizeTracker;
pub use runtime::Runtime;
