use crate::{
    ease::Ease,
    error::RevelaResult,
    tween::Tween,
    variant::PropertySet,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HoverState {
    Rest,
    Hovered,
}

/// Two-state pointer machine for one interactive card. The state flip is
/// instantaneous; the rendered properties chase the new snapshot through a
/// short eased tween. Leaving mid-flight reverses from the current
/// interpolated value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HoverMachine {
    rest: PropertySet,
    hovered: PropertySet,
    duration_secs: f64,
    ease: Ease,
    state: HoverState,
    tween: Tween<PropertySet>,
}

impl HoverMachine {
    pub fn new(
        rest: PropertySet,
        hovered: PropertySet,
        duration_secs: f64,
        ease: Ease,
    ) -> RevelaResult<Self> {
        rest.validate()?;
        hovered.validate()?;
        Ok(Self {
            rest,
            hovered,
            duration_secs: duration_secs.max(0.0),
            ease,
            state: HoverState::Rest,
            tween: Tween::settled(rest),
        })
    }

    /// Card lift used across the page: translate up, grow slightly.
    pub fn lift(dy: f64, scale: f64) -> RevelaResult<Self> {
        let hovered = PropertySet {
            translate: crate::core::Vec2::new(0.0, dy),
            scale,
            ..PropertySet::default()
        };
        Self::new(PropertySet::default(), hovered, 0.3, Ease::OutCubic)
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn pointer_enter(&mut self) {
        if self.state == HoverState::Hovered {
            return;
        }
        self.state = HoverState::Hovered;
        tracing::trace!("hover enter");
        self.tween
            .retarget(self.hovered, self.duration_secs, self.ease, 0.0);
    }

    pub fn pointer_leave(&mut self) {
        if self.state == HoverState::Rest {
            return;
        }
        self.state = HoverState::Rest;
        tracing::trace!("hover leave");
        self.tween
            .retarget(self.rest, self.duration_secs, self.ease, 0.0);
    }

    pub fn tick(&mut self, dt_secs: f64) {
        self.tween.tick(dt_secs);
    }

    pub fn is_settled(&self) -> bool {
        self.tween.is_settled()
    }

    pub fn current(&self) -> PropertySet {
        self.tween.current()
    }
}
