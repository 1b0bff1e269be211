//! Game contract and the frame loop that drives it.
//!
//! The frame loop is platform-independent: it talks to the window only through an
//! `InputSource` and a `GraphicsDevice`, so it runs under test without either.

mod ctx;
mod frame_loop;
mod game;

pub use ctx::UpdateCtx;
pub use frame_loop::{FrameLoop, LoopState, Tick};
pub use game::{dispatch_input, AppControl, Game};
