//! Input subsystem.
//!
//! Two layers:
//! - `PlatformInput` is the raw polling view (what is held right now), fed by window events
//! - `Mouse` and `Keyboard` sample an `InputSource` once per tick and derive edges
//!   (pressed/released) and double-clicks from consecutive samples
//!
//! Public API is platform-agnostic; winit translation lives in `platform`.

mod buttons;
mod double_click;
mod keyboard;
mod mouse;
mod source;
mod types;

pub mod platform;

pub use buttons::ButtonStates;
pub use double_click::{DoubleClickDetector, DoubleClickState, ARMED_CEILING};
pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use source::{InputSource, PlatformInput};
pub use types::{
    ButtonId,
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
};
