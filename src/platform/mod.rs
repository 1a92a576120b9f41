//! Platform abstraction layer
//!
//! Narrow interfaces the game loop drives:
//! - Time/ticks (`Clock`)
//! - Input events (`InputSource`)
//! - Drawing and audio (`Renderer`, `AudioOut`)

pub mod input;
pub mod output;
pub mod time;

pub use input::{InputEvent, InputSource, Key, QueueInput, ScriptedInput};
pub use output::{AudioOut, Color, Renderer, SilentAudio};
pub use time::{Clock, SteppedClock, SystemClock};
