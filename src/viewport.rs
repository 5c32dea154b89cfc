use crate::{
    core::{ElementBounds, Viewport},
    error::{RevelaError, RevelaResult},
};

/// When a watched element counts as entered, and whether it can un-enter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerConfig {
    /// Fraction of the element that must be visible, in [0,1]. A threshold
    /// of 0 fires on any positive overlap.
    pub threshold: f64,
    /// With `once` set, the first entered event is final: the watcher goes
    /// quiet and the element stays revealed no matter how the user scrolls.
    pub once: bool,
}

impl TriggerConfig {
    pub fn new(threshold: f64, once: bool) -> RevelaResult<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(RevelaError::validation(
                "trigger threshold must be in 0..=1",
            ));
        }
        Ok(Self { threshold, once })
    }

    pub fn once(threshold: f64) -> RevelaResult<Self> {
        Self::new(threshold, true)
    }
}

/// How a section decides to reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TriggerMode {
    /// Reveal on mount, no viewport gating (above-the-fold sections).
    Immediate,
    /// Reveal when the trigger region reports entered.
    OnVisible(TriggerConfig),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriggerEvent {
    Entered,
    Exited,
}

/// Threshold-crossing watcher for one element. Owned by the section that
/// mounted it; dropping the section detaches the watcher, so a callback can
/// never outlive its target.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TriggerRegion {
    config: TriggerConfig,
    entered: bool,
    fired: bool,
}

impl TriggerRegion {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            entered: false,
            fired: false,
        }
    }

    pub fn config(&self) -> TriggerConfig {
        self.config
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Evaluate the element against the current viewport, emitting a
    /// transition when the visibility threshold is crossed. `once` regions
    /// emit at most one `Entered` over their whole lifetime and never an
    /// `Exited`.
    pub fn update(
        &mut self,
        bounds: ElementBounds,
        viewport: Viewport,
    ) -> Option<TriggerEvent> {
        if self.config.once && self.fired {
            return None;
        }

        let fraction = bounds.visible_fraction(viewport);
        let inside = if self.config.threshold == 0.0 {
            fraction > 0.0
        } else {
            fraction >= self.config.threshold
        };

        if inside && !self.entered {
            self.entered = true;
            self.fired = true;
            tracing::debug!(threshold = self.config.threshold, "trigger entered");
            return Some(TriggerEvent::Entered);
        }
        if !inside && self.entered {
            self.entered = false;
            if self.config.once {
                return None;
            }
            tracing::debug!(threshold = self.config.threshold, "trigger exited");
            return Some(TriggerEvent::Exited);
        }
        None
    }
}
