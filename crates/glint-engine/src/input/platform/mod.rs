//! Platform glue for the input subsystem.
//!
//! Only this module (and the window runtime) may depend on winit input types.

mod double_click;
mod winit;

pub use double_click::{double_click_rate, DEFAULT_DOUBLE_CLICK_RATE};
pub use self::winit::{client_size, to_logical, translate_window_event};
