//! Scene-level state driven by input and time.
//!
//! Nothing here touches a backend: scenes read positions and transforms from
//! these types and issue draws through a `Canvas`.

mod body;
mod fighter;

pub use body::{boundary_allows, BouncingRectConfig, MoveOutcome, MovingBody};
pub use fighter::{FighterConfig, FighterPose};
