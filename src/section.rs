use crate::{
    core::{ElementBounds, Viewport},
    error::{RevelaError, RevelaResult},
    tween::Tween,
    variant::{PropertySet, VariantPair},
    viewport::{TriggerEvent, TriggerMode, TriggerRegion},
};

/// Everything a section needs to orchestrate its reveal: its layout bounds,
/// how it triggers, and the hidden/visible pairing. The visible variant's
/// transition carries the group stagger for the children.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub bounds: ElementBounds,
    pub mode: TriggerMode,
    pub pair: VariantPair,
    pub child_count: usize,
}

impl SectionConfig {
    pub fn validate(&self) -> RevelaResult<()> {
        if self.name.trim().is_empty() {
            return Err(RevelaError::validation("section name must be non-empty"));
        }
        self.pair.hidden.validate()?;
        self.pair.visible.validate()
    }
}

/// One page section: a trigger region, a variant pairing, and the staggered
/// child tweens it drives. All state is owned here; dropping the section
/// cancels everything it scheduled.
#[derive(Clone, Debug)]
pub struct Section {
    config: SectionConfig,
    region: Option<TriggerRegion>,
    children: Vec<Tween<PropertySet>>,
    revealed: bool,
}

impl Section {
    pub fn new(config: SectionConfig) -> RevelaResult<Self> {
        config.validate()?;
        let region = match config.mode {
            TriggerMode::Immediate => None,
            TriggerMode::OnVisible(cfg) => Some(TriggerRegion::new(cfg)),
        };
        let children = (0..config.child_count)
            .map(|_| Tween::settled(config.pair.hidden.props))
            .collect();
        Ok(Self {
            config,
            region,
            children,
            revealed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn bounds(&self) -> ElementBounds {
        self.config.bounds
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Called once when the engine mounts the section. Immediate sections
    /// start their reveal here; viewport-gated ones wait for their region.
    pub fn on_mount(&mut self) {
        if matches!(self.config.mode, TriggerMode::Immediate) {
            self.reveal();
        }
    }

    /// Evaluate the trigger region against the new scroll position and apply
    /// any resulting reveal or conceal. Returns the raw transition so the
    /// engine can arm counters on the first entry.
    pub fn observe(&mut self, viewport: Viewport) -> Option<TriggerEvent> {
        let region = self.region.as_mut()?;
        let event = region.update(self.config.bounds, viewport)?;
        match event {
            TriggerEvent::Entered => self.reveal(),
            TriggerEvent::Exited => self.conceal(),
        }
        Some(event)
    }

    /// Retarget every child toward the visible variant with its stagger
    /// delay. A reveal in flight is superseded, not stacked: the delay
    /// sequence restarts from t=0 and each child departs from its current
    /// interpolated value.
    fn reveal(&mut self) {
        let visible = &self.config.pair.visible;
        let schedule = visible.transition.stagger();
        tracing::debug!(section = %self.config.name, "reveal");
        for (i, child) in self.children.iter_mut().enumerate() {
            child.retarget_repeating(
                visible.props,
                visible.transition.duration_secs,
                visible.transition.ease,
                visible.transition.delay_secs + schedule.delay_for(i),
                visible.transition.repeat,
            );
        }
        self.revealed = true;
    }

    /// Send every child back to hidden, immediately and without stagger.
    fn conceal(&mut self) {
        let hidden = &self.config.pair.hidden;
        tracing::debug!(section = %self.config.name, "conceal");
        for child in self.children.iter_mut() {
            child.retarget(
                hidden.props,
                hidden.transition.duration_secs,
                hidden.transition.ease,
                0.0,
            );
        }
        self.revealed = false;
    }

    pub fn tick(&mut self, dt_secs: f64) {
        for child in self.children.iter_mut() {
            child.tick(dt_secs);
        }
    }

    pub fn child_props(&self, index: usize) -> Option<PropertySet> {
        self.children.get(index).map(Tween::current)
    }

    /// True while any child tween is still in flight, including a conceal
    /// running after the section lost its revealed state.
    pub fn has_pending(&self) -> bool {
        self.children.iter().any(|c| !c.is_settled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ease::Ease,
        variant::{Repeat, Transition, VariantRegistry},
        viewport::TriggerConfig,
    };

    fn pair() -> VariantPair {
        VariantRegistry::builtin().pair("hidden", "visible").unwrap()
    }

    fn linear_pair() -> VariantPair {
        let mut p = pair();
        p.visible.transition = Transition {
            duration_secs: 1.0,
            ease: Ease::Linear,
            ..Transition::default()
        };
        p.hidden.transition = p.visible.transition;
        p
    }

    fn on_visible_section(child_count: usize, once: bool) -> Section {
        let mut pair = linear_pair();
        pair.visible.transition.stagger_children_secs = 0.1;
        Section::new(SectionConfig {
            name: "values".into(),
            bounds: ElementBounds::new(1000.0, 400.0).unwrap(),
            mode: TriggerMode::OnVisible(TriggerConfig::new(0.25, once).unwrap()),
            pair,
            child_count,
        })
        .unwrap()
    }

    fn vp(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, 800.0).unwrap()
    }

    #[test]
    fn children_start_hidden() {
        let s = on_visible_section(3, true);
        let p = s.child_props(0).unwrap();
        assert_eq!(p.opacity, 0.0);
        assert_eq!(p.translate.y, 40.0);
        assert!(!s.is_revealed());
    }

    #[test]
    fn immediate_section_reveals_on_mount() {
        let mut s = Section::new(SectionConfig {
            name: "hero".into(),
            bounds: ElementBounds::new(0.0, 600.0).unwrap(),
            mode: TriggerMode::Immediate,
            pair: linear_pair(),
            child_count: 2,
        })
        .unwrap();
        s.on_mount();
        assert!(s.is_revealed());
        s.tick(10.0);
        assert_eq!(s.child_props(0).unwrap(), PropertySet::default());
    }

    #[test]
    fn stagger_orders_children_behind_each_other() {
        let mut s = on_visible_section(3, true);
        assert_eq!(s.observe(vp(400.0)), Some(TriggerEvent::Entered));
        // At 0.55s: child 0 is 0.55 in, child 1 is 0.45 in, child 2 is 0.35.
        s.tick(0.55);
        let o: Vec<f64> = (0..3).map(|i| s.child_props(i).unwrap().opacity).collect();
        assert!(o[0] > o[1]);
        assert!(o[1] > o[2]);
    }

    #[test]
    fn repeating_section_conceals_on_exit() {
        let mut s = on_visible_section(2, false);
        s.observe(vp(400.0));
        s.tick(5.0);
        assert_eq!(s.child_props(0).unwrap().opacity, 1.0);
        assert_eq!(s.observe(vp(0.0)), Some(TriggerEvent::Exited));
        s.tick(5.0);
        assert_eq!(s.child_props(0).unwrap().opacity, 0.0);
        assert!(!s.is_revealed());
    }

    #[test]
    fn retrigger_supersedes_the_pending_reveal() {
        let mut s = on_visible_section(2, false);
        s.observe(vp(400.0));
        s.tick(0.5);
        let mid = s.child_props(0).unwrap().opacity;
        assert!(mid > 0.0 && mid < 1.0);
        s.observe(vp(0.0)); // exit mid-reveal
        // Conceal departs from the interpolated value, no snap.
        assert_eq!(s.child_props(0).unwrap().opacity, mid);
        s.observe(vp(400.0)); // re-enter restarts the full sequence
        s.tick(1.1);
        assert_eq!(s.child_props(0).unwrap().opacity, 1.0);
        assert_eq!(s.child_props(1).unwrap().opacity, 1.0);
    }

    #[test]
    fn emphasis_children_spin_in() {
        let reg = VariantRegistry::builtin();
        let mut pair = reg.pair("emphasis", "visible").unwrap();
        pair.visible.transition = Transition {
            duration_secs: 0.6,
            ease: Ease::OutBack,
            stagger_children_secs: 0.1,
            ..Transition::default()
        };
        let mut s = Section::new(SectionConfig {
            name: "value-icons".into(),
            bounds: ElementBounds::new(1000.0, 400.0).unwrap(),
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.1).unwrap()),
            pair,
            child_count: 4,
        })
        .unwrap();
        let start = s.child_props(0).unwrap();
        assert_eq!(start.rotation_deg, -180.0);
        assert_eq!(start.scale, 0.0);
        s.observe(vp(600.0));
        s.tick(2.0);
        assert_eq!(s.child_props(3).unwrap(), PropertySet::default());
    }

    #[test]
    fn empty_name_is_rejected() {
        let cfg = SectionConfig {
            name: "  ".into(),
            bounds: ElementBounds::new(0.0, 100.0).unwrap(),
            mode: TriggerMode::Immediate,
            pair: pair(),
            child_count: 1,
        };
        assert!(Section::new(cfg).is_err());
    }

    #[test]
    fn looping_variant_keeps_cycling() {
        let mut pair = linear_pair();
        pair.visible.transition.repeat = Repeat::Forever;
        let mut s = Section::new(SectionConfig {
            name: "shimmer".into(),
            bounds: ElementBounds::new(0.0, 600.0).unwrap(),
            mode: TriggerMode::Immediate,
            pair,
            child_count: 1,
        })
        .unwrap();
        s.on_mount();
        s.tick(2.5); // wrapped into the third play
        let p = s.child_props(0).unwrap();
        assert!((p.opacity - 0.5).abs() < 1e-12);
        assert!(s.has_pending());
        s.tick(100.0);
        assert!(s.has_pending());
    }
}
