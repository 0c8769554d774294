//! Frame timing.
//!
//! One `FrameClock` per renderer; `tick()` once per `update()` yields the
//! delta and elapsed seconds pushed to the time uniforms.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
