use std::collections::BTreeMap;

use crate::{
    core::{ElementBounds, Viewport},
    counter::StatCounter,
    error::{RevelaError, RevelaResult},
    hover::HoverMachine,
    mapper::RangeMap,
    scroll::ScrollTracker,
    section::Section,
    variant::PropertySet,
    viewport::TriggerEvent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SectionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct HoverId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct CounterId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ParallaxId(u64);

#[derive(Debug)]
struct CounterEntry {
    owner: SectionId,
    counter: StatCounter,
}

#[derive(Debug)]
struct HoverEntry {
    owner: SectionId,
    machine: HoverMachine,
}

#[derive(Debug)]
struct ParallaxEntry {
    owner: SectionId,
    bounds: ElementBounds,
    tracker: ScrollTracker,
    map: RangeMap<f64>,
    value: f64,
}

/// Single-threaded frame scheduler. The host drives it with scroll
/// observations, pointer events, and one `tick` per display frame; all
/// animation state lives behind id handles owned here. Unmounting a section
/// cancels every tween, counter, hover, and parallax binding it owns —
/// updates addressed to a stale id afterward are logged no-ops, never
/// errors.
#[derive(Debug, Default)]
pub struct Engine {
    next_id: u64,
    sections: BTreeMap<SectionId, Section>,
    hovers: BTreeMap<HoverId, HoverEntry>,
    counters: BTreeMap<CounterId, CounterEntry>,
    parallax: BTreeMap<ParallaxId, ParallaxEntry>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn mount_section(&mut self, mut section: Section) -> SectionId {
        let id = SectionId(self.next());
        tracing::debug!(section = section.name(), ?id, "mount");
        section.on_mount();
        self.sections.insert(id, section);
        id
    }

    /// Cancel everything the section owns and detach its watchers. A stale
    /// id is a no-op: a callback that outlives its target must never update
    /// anything.
    pub fn unmount_section(&mut self, id: SectionId) {
        match self.sections.remove(&id) {
            Some(section) => {
                let hovers_before = self.hovers.len();
                self.hovers.retain(|_, e| e.owner != id);
                self.counters.retain(|_, e| e.owner != id);
                self.parallax.retain(|_, e| e.owner != id);
                tracing::debug!(
                    section = section.name(),
                    cancelled_hovers = hovers_before - self.hovers.len(),
                    "unmount"
                );
            }
            None => tracing::debug!(?id, "unmount for detached section ignored"),
        }
    }

    pub fn add_hover(&mut self, owner: SectionId, machine: HoverMachine) -> RevelaResult<HoverId> {
        self.require_section(owner)?;
        let id = HoverId(self.next());
        self.hovers.insert(id, HoverEntry { owner, machine });
        Ok(id)
    }

    /// An owner that is already revealed (immediate mode, or entered before
    /// the attachment) has no future entered event, so the counter arms
    /// right away.
    pub fn add_counter(&mut self, owner: SectionId, mut counter: StatCounter) -> RevelaResult<CounterId> {
        self.require_section(owner)?;
        if self.sections.get(&owner).is_some_and(Section::is_revealed) {
            counter.arm();
        }
        let id = CounterId(self.next());
        self.counters.insert(id, CounterEntry { owner, counter });
        Ok(id)
    }

    pub fn add_parallax(
        &mut self,
        owner: SectionId,
        bounds: ElementBounds,
        tracker: ScrollTracker,
        map: RangeMap<f64>,
    ) -> RevelaResult<ParallaxId> {
        self.require_section(owner)?;
        let value = map.map(0.0);
        let id = ParallaxId(self.next());
        self.parallax.insert(
            id,
            ParallaxEntry {
                owner,
                bounds,
                tracker,
                map,
                value,
            },
        );
        Ok(id)
    }

    fn require_section(&self, id: SectionId) -> RevelaResult<()> {
        if self.sections.contains_key(&id) {
            Ok(())
        } else {
            Err(RevelaError::validation(format!(
                "section {id:?} is not mounted"
            )))
        }
    }

    /// Feed a new scroll position through every trigger region and scroll
    /// binding. Counters owned by a section arm on its first entered event.
    /// Trigger evaluation and parallax sampling are independent; their
    /// relative order within this call carries no meaning.
    pub fn observe_scroll(&mut self, viewport: Viewport) {
        for (id, section) in self.sections.iter_mut() {
            if let Some(TriggerEvent::Entered) = section.observe(viewport) {
                for entry in self.counters.values_mut() {
                    if entry.owner == *id {
                        entry.counter.arm();
                    }
                }
            }
        }
        for entry in self.parallax.values_mut() {
            let progress = entry.tracker.progress(entry.bounds, viewport);
            entry.value = entry.map.map_memo(progress);
        }
    }

    /// Advance every in-flight tween and counter by one frame's worth of
    /// time. Called once per display frame by the host.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, dt_secs: f64) {
        for section in self.sections.values_mut() {
            section.tick(dt_secs);
        }
        for entry in self.hovers.values_mut() {
            entry.machine.tick(dt_secs);
        }
        for entry in self.counters.values_mut() {
            entry.counter.tick(dt_secs);
        }
    }

    pub fn pointer_enter(&mut self, id: HoverId) {
        match self.hovers.get_mut(&id) {
            Some(entry) => entry.machine.pointer_enter(),
            None => tracing::debug!(?id, "pointer enter for detached hover ignored"),
        }
    }

    pub fn pointer_leave(&mut self, id: HoverId) {
        match self.hovers.get_mut(&id) {
            Some(entry) => entry.machine.pointer_leave(),
            None => tracing::debug!(?id, "pointer leave for detached hover ignored"),
        }
    }

    pub fn section_revealed(&self, id: SectionId) -> Option<bool> {
        self.sections.get(&id).map(Section::is_revealed)
    }

    pub fn child_props(&self, id: SectionId, index: usize) -> Option<PropertySet> {
        self.sections.get(&id).and_then(|s| s.child_props(index))
    }

    pub fn hover_props(&self, id: HoverId) -> Option<PropertySet> {
        self.hovers.get(&id).map(|e| e.machine.current())
    }

    pub fn counter_value(&self, id: CounterId) -> Option<i64> {
        self.counters.get(&id).map(|e| e.counter.displayed())
    }

    pub fn parallax_value(&self, id: ParallaxId) -> Option<f64> {
        self.parallax.get(&id).map(|e| e.value)
    }

    /// True while any section tween, hover, or counter still has motion
    /// pending — hosts can park the frame loop when this goes false.
    pub fn is_animating(&self) -> bool {
        self.sections.values().any(Section::has_pending)
            || self.hovers.values().any(|e| !e.machine.is_settled())
            || self
                .counters
                .values()
                .any(|e| e.counter.is_armed() && !e.counter.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ease::Ease,
        scroll::ScrollOffsets,
        section::SectionConfig,
        variant::{Transition, VariantRegistry},
        viewport::{TriggerConfig, TriggerMode},
    };

    fn vp(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, 800.0).unwrap()
    }

    fn section_at(name: &str, top: f64, mode: TriggerMode) -> Section {
        let mut pair = VariantRegistry::builtin().pair("hidden", "visible").unwrap();
        pair.visible.transition = Transition {
            duration_secs: 0.5,
            ease: Ease::Linear,
            stagger_children_secs: 0.1,
            delay_children_secs: 0.1,
            ..Transition::default()
        };
        Section::new(SectionConfig {
            name: name.into(),
            bounds: ElementBounds::new(top, 400.0).unwrap(),
            mode,
            pair,
            child_count: 3,
        })
        .unwrap()
    }

    fn gated_section(name: &str, top: f64) -> Section {
        section_at(
            name,
            top,
            TriggerMode::OnVisible(TriggerConfig::once(0.2).unwrap()),
        )
    }

    #[test]
    fn scroll_reveals_gated_section_and_arms_counters() {
        let mut engine = Engine::new();
        let id = engine.mount_section(gated_section("stats", 1000.0));
        let counter = engine
            .add_counter(id, StatCounter::new(500, 2.0, Ease::OutCubic).unwrap())
            .unwrap();

        engine.observe_scroll(vp(0.0));
        engine.tick(1.0);
        assert_eq!(engine.counter_value(counter), Some(0));

        engine.observe_scroll(vp(600.0));
        assert_eq!(engine.section_revealed(id), Some(true));
        engine.tick(3.0);
        assert_eq!(engine.counter_value(counter), Some(500));
    }

    #[test]
    fn unmount_cancels_children_counters_and_hovers() {
        let mut engine = Engine::new();
        let id = engine.mount_section(gated_section("team", 1000.0));
        let hover = engine
            .add_hover(id, HoverMachine::lift(-8.0, 1.02).unwrap())
            .unwrap();
        let counter = engine
            .add_counter(id, StatCounter::new(10, 1.0, Ease::Linear).unwrap())
            .unwrap();

        engine.observe_scroll(vp(600.0));
        engine.tick(0.1); // mid-stagger
        engine.unmount_section(id);

        assert_eq!(engine.child_props(id, 0), None);
        assert_eq!(engine.hover_props(hover), None);
        assert_eq!(engine.counter_value(counter), None);
        assert!(!engine.is_animating());

        // Late updates addressed to the removed section are no-ops.
        engine.pointer_enter(hover);
        engine.unmount_section(id);
        engine.observe_scroll(vp(600.0));
        engine.tick(1.0);
        assert_eq!(engine.child_props(id, 0), None);
    }

    #[test]
    fn attaching_to_a_stale_section_is_an_error() {
        let mut engine = Engine::new();
        let id = engine.mount_section(gated_section("values", 1000.0));
        engine.unmount_section(id);
        assert!(engine.add_hover(id, HoverMachine::lift(-10.0, 1.03).unwrap()).is_err());
    }

    #[test]
    fn parallax_follows_scroll_and_detaches_with_its_owner() {
        let mut engine = Engine::new();
        let id = engine.mount_section(gated_section("hero", 1600.0));
        let bounds = ElementBounds::new(1600.0, 400.0).unwrap();
        let parallax = engine
            .add_parallax(
                id,
                bounds,
                ScrollTracker::new(ScrollOffsets::enter_to_exit()),
                RangeMap::linear(0.0, 0.0, 1.0, 0.3).unwrap(),
            )
            .unwrap();

        engine.observe_scroll(vp(800.0));
        assert_eq!(engine.parallax_value(parallax), Some(0.0));
        engine.observe_scroll(vp(1400.0));
        assert_eq!(engine.parallax_value(parallax), Some(0.15));
        engine.observe_scroll(vp(9000.0));
        assert_eq!(engine.parallax_value(parallax), Some(0.3));

        engine.unmount_section(id);
        assert_eq!(engine.parallax_value(parallax), None);
    }

    #[test]
    fn conceal_in_flight_keeps_the_engine_animating() {
        let mut engine = Engine::new();
        let id = engine.mount_section(section_at(
            "gallery",
            1000.0,
            TriggerMode::OnVisible(TriggerConfig::new(0.2, false).unwrap()),
        ));
        engine.observe_scroll(vp(600.0));
        engine.tick(5.0);
        assert!(!engine.is_animating());

        // Leaving starts the fade back to hidden; the loop must keep
        // running until it lands.
        engine.observe_scroll(vp(0.0));
        engine.tick(0.1);
        let o = engine.child_props(id, 0).unwrap().opacity;
        assert!(o > 0.0 && o < 1.0);
        assert!(engine.is_animating());

        engine.tick(5.0);
        assert_eq!(engine.child_props(id, 0).unwrap().opacity, 0.0);
        assert!(!engine.is_animating());
    }

    #[test]
    fn counter_on_an_immediate_section_runs_without_scrolling() {
        let mut engine = Engine::new();
        let id = engine.mount_section(section_at("hero-stats", 0.0, TriggerMode::Immediate));
        let counter = engine
            .add_counter(id, StatCounter::new(10, 1.0, Ease::Linear).unwrap())
            .unwrap();
        engine.tick(0.5);
        assert_eq!(engine.counter_value(counter), Some(5));
        engine.tick(1.0);
        assert_eq!(engine.counter_value(counter), Some(10));
    }

    #[test]
    fn is_animating_settles_once_motion_finishes() {
        let mut engine = Engine::new();
        let id = engine.mount_section(gated_section("cta", 1000.0));
        engine.observe_scroll(vp(600.0));
        assert!(engine.is_animating());
        engine.tick(5.0);
        assert!(!engine.is_animating());
        let _ = id;
    }
}
