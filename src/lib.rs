//! Floor-plan placement engine.
//!
//! Given a plot and a list of room requests (size plus an optional corner,
//! centered, or relative constraint) the engine computes non-overlapping
//! rectangles for every room it can fit, and supports collision-checked
//! moves of placed rooms for interactive editing. Rendering and spec
//! sources live outside the crate; they exchange [`RawRoom`]s and
//! [`LayoutOutcome`]s with it.
//!
//! ```
//! use floorplan::{Plot, RawRoom, Rect, generate};
//!
//! let plot = Plot::new(40, 30)?;
//! let outcome = generate(
//!     plot,
//!     &[
//!         RawRoom::new("Bedroom", 12, 10).with_constraint("top-left"),
//!         RawRoom::new("Pooja", 5, 5).with_constraint("bottom-of-bedroom"),
//!     ],
//! )?;
//! assert_eq!(outcome.rect_of("pooja"), Some(Rect::new(0, 10, 5, 5)));
//! # Ok::<(), floorplan::LayoutError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod placement;
pub mod session;
pub mod spec;

pub use config::{LayoutConfig, SearchSettings};
pub use error::{LayoutError, Result};
pub use geometry::{Plot, Point, Rect};
pub use layout::{FreeOrder, LayoutEngine, LayoutOutcome, LayoutStats, generate};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, PlacementMetrics};
pub use placement::PlacementSet;
pub use session::{LayoutSession, MoveDirection, MoveOutcome, Slide, move_room, moved};
pub use spec::{
    Constraint, ConstraintPolicy, ConstraintWarning, Corner, RawRoom, RelativeDirection, RoomSpec,
    validate_rooms,
};
