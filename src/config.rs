use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::layout::FreeOrder;
use crate::logging::{LogEvent, Logger};
use crate::metrics::PlacementMetrics;
use crate::spec::ConstraintPolicy;

/// Numeric knobs of the placement search. Deserializable so hosts can keep
/// them in a JSON settings file; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Distance of one nudge or move step, in plot units.
    pub step: i32,
    /// Upper bound on candidate positions tried per room.
    pub max_attempts: u32,
    /// Offset of the free-placement cursor from the top-left corner.
    pub cursor_margin: i32,
    /// Gap left between rooms laid out by the cursor.
    pub cursor_gap: i32,
    pub free_order: FreeOrder,
    pub constraint_policy: ConstraintPolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            step: 1,
            max_attempts: 10_000,
            cursor_margin: 0,
            cursor_gap: 0,
            free_order: FreeOrder::Input,
            constraint_policy: ConstraintPolicy::Lenient,
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> Result<()> {
        if self.step <= 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.max_attempts == 0 {
            return Err(LayoutError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.cursor_margin < 0 || self.cursor_gap < 0 {
            return Err(LayoutError::InvalidConfig(
                "cursor margin and gap cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for [`LayoutEngine`](crate::LayoutEngine) and
/// [`LayoutSession`](crate::LayoutSession).
#[derive(Clone, Default)]
pub struct LayoutConfig {
    pub search: SearchSettings,
    /// Optional structured logger for placement and move events.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<PlacementMetrics>>>,
}

impl LayoutConfig {
    pub fn new(search: SearchSettings) -> Self {
        Self {
            search,
            ..Self::default()
        }
    }

    /// Load search settings from JSON; logger and metrics stay unset.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let search: SearchSettings = serde_json::from_str(text)?;
        search.validate()?;
        Ok(Self::new(search))
    }

    pub fn with_step(mut self, step: i32) -> Self {
        self.search.step = step;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.search.max_attempts = max_attempts;
        self
    }

    pub fn with_cursor(mut self, margin: i32, gap: i32) -> Self {
        self.search.cursor_margin = margin;
        self.search.cursor_gap = gap;
        self
    }

    pub fn with_free_order(mut self, order: FreeOrder) -> Self {
        self.search.free_order = order;
        self
    }

    pub fn with_constraint_policy(mut self, policy: ConstraintPolicy) -> Self {
        self.search.constraint_policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(PlacementMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<PlacementMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub(crate) fn emit(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn with_metrics(&self, update: impl FnOnce(&mut PlacementMetrics)) {
        if let Some(handle) = &self.metrics
            && let Ok(mut metrics) = handle.lock()
        {
            update(&mut metrics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SearchSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.step, 1);
        assert_eq!(settings.free_order, FreeOrder::Input);
    }

    #[test]
    fn json_settings_fill_missing_fields() {
        let config =
            LayoutConfig::from_json_str(r#"{"step": 2, "free_order": "largest_first"}"#).unwrap();
        assert_eq!(config.search.step, 2);
        assert_eq!(config.search.free_order, FreeOrder::LargestFirst);
        assert_eq!(config.search.max_attempts, 10_000);
        assert!(config.logger.is_none());
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"step": 0}"#).err().unwrap();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }

    #[test]
    fn enable_metrics_is_idempotent() {
        let mut config = LayoutConfig::default();
        config.enable_metrics();
        let first = config.metrics_handle().unwrap();
        config.enable_metrics();
        let second = config.metrics_handle().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
