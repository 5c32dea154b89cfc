use crate::{
    ease::Ease,
    error::{RevelaError, RevelaResult},
};

/// Time-driven integer count-up, armed once by the first entered event of
/// its section and immune to re-triggering afterward. The displayed value
/// climbs monotonically and lands exactly on the target at the end of the
/// duration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StatCounter {
    start: i64,
    target: i64,
    duration_secs: f64,
    ease: Ease,
    armed: bool,
    elapsed_secs: f64,
    displayed: i64,
}

impl StatCounter {
    pub fn new(target: i64, duration_secs: f64, ease: Ease) -> RevelaResult<Self> {
        Self::with_start(0, target, duration_secs, ease)
    }

    pub fn with_start(
        start: i64,
        target: i64,
        duration_secs: f64,
        ease: Ease,
    ) -> RevelaResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(RevelaError::validation("counter duration must be > 0"));
        }
        if !ease.is_monotonic() {
            return Err(RevelaError::validation(
                "counter ease must be monotonic so the value never overshoots",
            ));
        }
        Ok(Self {
            start,
            target,
            duration_secs,
            ease,
            armed: false,
            elapsed_secs: 0.0,
            displayed: start,
        })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Start counting. Idempotent: further entered events (from a repeating
    /// trigger region) never restart the count.
    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            tracing::debug!(target = self.target, "counter armed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_finished(&self) -> bool {
        self.armed && self.elapsed_secs >= self.duration_secs
    }

    pub fn tick(&mut self, dt_secs: f64) {
        if !self.armed || dt_secs <= 0.0 {
            return;
        }
        self.elapsed_secs += dt_secs;
        let t = (self.elapsed_secs / self.duration_secs).min(1.0);
        let eased = self.ease.apply(t);
        let span = (self.target - self.start) as f64;
        let raw = self.start as f64 + span * eased;
        let next = if self.target >= self.start {
            (raw.floor() as i64).clamp(self.start, self.target)
        } else {
            (raw.ceil() as i64).clamp(self.target, self.start)
        };
        // Monotone toward the target even if a coarse tick lands oddly.
        self.displayed = if self.target >= self.start {
            next.max(self.displayed)
        } else {
            next.min(self.displayed)
        };
        if t >= 1.0 {
            self.displayed = self.target;
        }
    }

    pub fn displayed(&self) -> i64 {
        self.displayed
    }
}
