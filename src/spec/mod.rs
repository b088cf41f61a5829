//! Room spec validation: raw entries in, ordered [`RoomSpec`]s out.
//!
//! Spec sources (text lines, JSON bodies, or anything a host parses itself)
//! produce [`RawRoom`]s; [`validate_rooms`] is the only gate into placement.

mod constraint;
mod core;
pub mod text;

pub use constraint::{Constraint, Corner, Horizontal, RelativeDirection, Vertical};
pub use self::core::{
    ConstraintPolicy, ConstraintWarning, Dimension, RawRoom, RoomSpec, ValidatedRooms,
    WarningKind, validate_rooms,
};
pub use text::{parse_plot, parse_room_json, parse_room_lines};
