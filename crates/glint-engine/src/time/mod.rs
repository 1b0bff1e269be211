//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per frame loop, started when the loop starts
//! - call `Clock::update_delta_time()` once per tick and wrap the result in a `FrameSample`
//! - feed every sample's delta into a `FrameTimer` to obtain a smoothed FPS value

mod clock;
mod frame_timer;

pub use clock::{Clock, FrameSample};
pub use frame_timer::FrameTimer;
