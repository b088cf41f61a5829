//! Incremental editing of a generated layout.

mod core;
mod moves;

pub use self::core::{LayoutSession, Slide};
pub use moves::{MoveDirection, MoveOutcome, move_room, moved};
