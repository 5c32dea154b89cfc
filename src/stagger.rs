use crate::error::{RevelaError, RevelaResult};

/// Per-child delay assignment for a group reveal: child `i` starts at
/// `base + i * interval` after the owning trigger fires. An interval of
/// zero means all children start together (staggering disabled).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerSchedule {
    pub base_delay_secs: f64,
    pub interval_secs: f64,
}

impl StaggerSchedule {
    pub fn new(base_delay_secs: f64, interval_secs: f64) -> RevelaResult<Self> {
        if !base_delay_secs.is_finite() || !interval_secs.is_finite() {
            return Err(RevelaError::validation("stagger times must be finite"));
        }
        if base_delay_secs < 0.0 || interval_secs < 0.0 {
            return Err(RevelaError::validation("stagger times must be >= 0"));
        }
        Ok(Self {
            base_delay_secs,
            interval_secs,
        })
    }

    pub fn none() -> Self {
        Self {
            base_delay_secs: 0.0,
            interval_secs: 0.0,
        }
    }

    pub fn delay_for(self, index: usize) -> f64 {
        self.base_delay_secs + index as f64 * self.interval_secs
    }

    pub fn delays(self, child_count: usize) -> Vec<f64> {
        (0..child_count).map(|i| self.delay_for(i)).collect()
    }
}
