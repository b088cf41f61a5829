//! Placement state shared by generation and interactive editing.

mod core;

pub use self::core::PlacementSet;
