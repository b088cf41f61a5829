use thiserror::Error;

/// Unified result type for the floorplan crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced while validating a layout request.
///
/// Placement failures are not errors: a room that finds no legal position is
/// reported in the layout outcome and generation carries on.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid room spec: {0}")]
    InvalidSpec(String),
    #[error("invalid plot: {0}")]
    InvalidPlot(String),
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error("unknown move direction `{0}`")]
    UnknownDirection(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// True for errors caused by a malformed request (rooms or plot size).
    pub fn is_invalid_spec(&self) -> bool {
        matches!(self, Self::InvalidSpec(_) | Self::InvalidPlot(_))
    }
}
