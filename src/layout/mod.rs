//! Layout generation: constraint resolution plus collision-avoiding placement.
//!
//! Callers normally go through [`LayoutEngine`] (or the [`generate`]
//! shorthand); the resolver and placer are public for hosts that drive the
//! phases themselves.

mod engine;
pub mod placer;
pub mod resolver;

pub use engine::{LayoutEngine, LayoutOutcome, LayoutStats, generate};
pub use placer::{Placer, SearchOutcome};
pub use resolver::{Anchor, AnchorSource, Cursor, FreeOrder, NudgeAxis, anchor_for, resolution_order};
