use crate::{
    ease::Ease,
    variant::{Lerp, Repeat},
};

/// A single in-flight property transition, advanced by explicit scheduler
/// ticks. Retargeting replaces the pending motion and starts from the
/// current interpolated value, so rapid re-triggers neither accumulate
/// timers nor snap visually.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration_secs: f64,
    ease: Ease,
    delay_secs: f64,
    elapsed_secs: f64,
    #[serde(default)]
    repeat: Repeat,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            duration_secs: 0.0,
            ease: Ease::Linear,
            delay_secs: 0.0,
            elapsed_secs: 0.0,
            repeat: Repeat::None,
        }
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    /// Drop any pending motion and head for `to` from wherever we are now.
    pub fn retarget(&mut self, to: T, duration_secs: f64, ease: Ease, delay_secs: f64) {
        self.retarget_repeating(to, duration_secs, ease, delay_secs, Repeat::None);
    }

    /// `retarget` with a replay policy: after the first play the motion
    /// restarts from `from`, either a fixed number of times or forever.
    pub fn retarget_repeating(
        &mut self,
        to: T,
        duration_secs: f64,
        ease: Ease,
        delay_secs: f64,
        repeat: Repeat,
    ) {
        self.from = self.current();
        self.to = to;
        self.duration_secs = duration_secs.max(0.0);
        self.ease = ease;
        self.delay_secs = delay_secs.max(0.0);
        self.elapsed_secs = 0.0;
        self.repeat = repeat;
    }

    /// Jump straight to `value` with no animation.
    pub fn snap_to(&mut self, value: T) {
        *self = Self::settled(value);
    }

    pub fn tick(&mut self, dt_secs: f64) {
        if dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
    }

    pub fn is_settled(&self) -> bool {
        let single = self.delay_secs + self.duration_secs;
        match self.repeat {
            Repeat::None => self.elapsed_secs >= single,
            Repeat::Count(extra) => {
                self.elapsed_secs >= single + self.duration_secs * f64::from(extra)
            }
            Repeat::Forever => self.duration_secs <= 0.0 && self.elapsed_secs >= single,
        }
    }

    /// Time within the current play, or `None` once the motion is complete
    /// and the target value holds.
    fn cycle_time(&self, active: f64) -> Option<f64> {
        if self.duration_secs <= 0.0 {
            return None;
        }
        match self.repeat {
            Repeat::None => (active < self.duration_secs).then_some(active),
            Repeat::Count(extra) => {
                let total = self.duration_secs * (f64::from(extra) + 1.0);
                (active < total).then(|| active % self.duration_secs)
            }
            Repeat::Forever => Some(active % self.duration_secs),
        }
    }

    pub fn current(&self) -> T {
        let active = self.elapsed_secs - self.delay_secs;
        if active < 0.0 {
            return self.from.clone();
        }
        match self.cycle_time(active) {
            Some(t) => {
                let eased = self.ease.apply(t / self.duration_secs);
                T::lerp(&self.from, &self.to, eased)
            }
            None => self.to.clone(),
        }
    }
}
