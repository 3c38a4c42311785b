//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s.

pub(crate) mod platform;
mod state;
mod types;

pub(crate) use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
