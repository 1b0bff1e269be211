//! Glint engine crate.
//!
//! A small 2D game framework: a frame loop with polled mouse/keyboard input, an
//! immediate-mode canvas of lines, rectangles, ellipses and text, and a wgpu renderer
//! behind a single window.
//!
//! Entry point is [`window::Runtime::run`] with a type implementing [`core::Game`].

pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod time;
pub mod window;
