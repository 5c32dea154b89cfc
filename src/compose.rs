use crate::{
    content::{NavTarget, PageContent},
    core::ElementBounds,
    counter::StatCounter,
    ease::Ease,
    engine::{CounterId, Engine, HoverId, ParallaxId, SectionId},
    error::RevelaResult,
    hover::HoverMachine,
    mapper::RangeMap,
    scroll::{ScrollOffsets, ScrollTracker},
    section::{Section, SectionConfig},
    stagger::StaggerSchedule,
    variant::{EMPHASIS, HIDDEN, Transition, VISIBLE, VariantPair, VariantRegistry},
    viewport::{TriggerConfig, TriggerMode},
};

/// Decorative particle background. Opaque to the engine: one mount call, no
/// parameters, runs on its own afterward.
pub trait AmbientLayer {
    fn mount(&mut self);
}

/// Host without a decorative layer.
pub struct NoAmbient;

impl AmbientLayer for NoAmbient {
    fn mount(&mut self) {}
}

/// Document-space placement of each page section, supplied by the host's
/// layout pass.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    pub hero: ElementBounds,
    pub story: ElementBounds,
    pub values: ElementBounds,
    pub stats: ElementBounds,
    pub studio: ElementBounds,
    pub team: ElementBounds,
    pub cta: ElementBounds,
}

impl PageLayout {
    /// Sections stacked top to bottom with the given heights.
    pub fn stacked(heights: [f64; 7]) -> RevelaResult<Self> {
        let mut tops = [0.0f64; 7];
        let mut y = 0.0;
        for (i, h) in heights.iter().enumerate() {
            tops[i] = y;
            y += h;
        }
        Ok(Self {
            hero: ElementBounds::new(tops[0], heights[0])?,
            story: ElementBounds::new(tops[1], heights[1])?,
            values: ElementBounds::new(tops[2], heights[2])?,
            stats: ElementBounds::new(tops[3], heights[3])?,
            studio: ElementBounds::new(tops[4], heights[4])?,
            team: ElementBounds::new(tops[5], heights[5])?,
            cta: ElementBounds::new(tops[6], heights[6])?,
        })
    }
}

/// Handles into the engine for everything the composed page animates.
#[derive(Clone, Debug)]
pub struct Page {
    pub hero: SectionId,
    pub hero_icon: SectionId,
    pub hero_parallax: ParallaxId,
    pub story: SectionId,
    pub story_parallax: ParallaxId,
    pub values: SectionId,
    pub value_icons: SectionId,
    pub value_hovers: Vec<HoverId>,
    pub stats: SectionId,
    pub stat_icons: SectionId,
    pub stat_counters: Vec<CounterId>,
    pub stat_hovers: Vec<HoverId>,
    pub studio: SectionId,
    pub studio_hovers: Vec<HoverId>,
    pub team: SectionId,
    pub team_hovers: Vec<HoverId>,
    pub cta: SectionId,
    pub cta_icon: SectionId,
    pub primary_nav: NavTarget,
    pub secondary_nav: NavTarget,
}

impl Page {
    pub fn section_ids(&self) -> Vec<SectionId> {
        vec![
            self.hero,
            self.hero_icon,
            self.story,
            self.values,
            self.value_icons,
            self.stats,
            self.stat_icons,
            self.studio,
            self.team,
            self.cta,
            self.cta_icon,
        ]
    }
}

/// Assembles the About page: wires static content to engine sections,
/// hovers, counters, and parallax bindings. Owns no animation logic — the
/// numbers here are the page's choreography, the behavior lives in the
/// engine.
pub struct PageComposer {
    registry: VariantRegistry,
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageComposer {
    pub fn new() -> Self {
        Self {
            registry: VariantRegistry::builtin(),
        }
    }

    pub fn with_registry(registry: VariantRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    fn reveal_pair(&self, duration_secs: f64, stagger: StaggerSchedule) -> RevelaResult<VariantPair> {
        let mut pair = self.registry.pair(HIDDEN, VISIBLE)?;
        pair.visible.transition = Transition {
            duration_secs,
            ease: Ease::OutCubic,
            stagger_children_secs: stagger.interval_secs,
            delay_children_secs: stagger.base_delay_secs,
            ..Transition::default()
        };
        // Exits never stagger, so the hidden side carries no group settings.
        pair.hidden.transition = Transition {
            duration_secs,
            ease: Ease::OutCubic,
            ..Transition::default()
        };
        Ok(pair)
    }

    fn emphasis_pair(&self, stagger: StaggerSchedule) -> RevelaResult<VariantPair> {
        let mut pair = self.registry.pair(EMPHASIS, VISIBLE)?;
        pair.visible.transition = Transition {
            duration_secs: 0.6,
            ease: Ease::OutBack,
            stagger_children_secs: stagger.interval_secs,
            delay_children_secs: stagger.base_delay_secs,
            ..Transition::default()
        };
        Ok(pair)
    }

    #[tracing::instrument(skip(self, engine, content, layout, ambient))]
    pub fn compose(
        &self,
        engine: &mut Engine,
        content: &PageContent,
        layout: &PageLayout,
        ambient: &mut dyn AmbientLayer,
    ) -> RevelaResult<Page> {
        content.validate()?;
        ambient.mount();

        // Group reveals share the page-wide stagger: children 0.1s apart
        // after a 0.1s lead-in, carried on the visible transition.
        let group = StaggerSchedule::new(0.1, 0.1)?;

        // Hero: above the fold, reveals on mount; kicker, heading, subtitle.
        let hero = engine.mount_section(Section::new(SectionConfig {
            name: "hero".into(),
            bounds: layout.hero,
            mode: TriggerMode::Immediate,
            pair: self.reveal_pair(0.6, group)?,
            child_count: 3,
        })?);
        let hero_icon = engine.mount_section(Section::new(SectionConfig {
            name: "hero-icon".into(),
            bounds: layout.hero,
            mode: TriggerMode::Immediate,
            pair: self.emphasis_pair(StaggerSchedule::none())?,
            child_count: 1,
        })?);
        let hero_parallax = engine.add_parallax(
            hero,
            layout.hero,
            ScrollTracker::new(ScrollOffsets::enter_to_exit()),
            RangeMap::linear(0.0, 0.0, 1.0, 0.3)?,
        )?;

        // Story: heading plus one child per paragraph, with a counter-drift
        // parallax backdrop.
        let story = engine.mount_section(Section::new(SectionConfig {
            name: "story".into(),
            bounds: layout.story,
            mode: TriggerMode::Immediate,
            pair: self.reveal_pair(0.5, group)?,
            child_count: 1 + content.story_paragraphs.len(),
        })?);
        let story_parallax = engine.add_parallax(
            story,
            layout.story,
            ScrollTracker::new(ScrollOffsets::enter_to_exit()),
            RangeMap::linear(0.0, -0.2, 1.0, 0.2)?,
        )?;

        // Values grid: header plus one card per value proposition, revealed
        // once a tenth of the grid scrolls into view.
        let values = engine.mount_section(Section::new(SectionConfig {
            name: "values".into(),
            bounds: layout.values,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.1)?),
            pair: self.reveal_pair(0.5, group)?,
            child_count: 1 + content.values.len(),
        })?);
        let value_icons = engine.mount_section(Section::new(SectionConfig {
            name: "value-icons".into(),
            bounds: layout.values,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.1)?),
            pair: self.emphasis_pair(StaggerSchedule::new(0.0, 0.1)?)?,
            child_count: content.values.len(),
        })?);
        let value_hovers = content
            .values
            .iter()
            .map(|_| engine.add_hover(values, HoverMachine::lift(-10.0, 1.03)?))
            .collect::<RevelaResult<Vec<_>>>()?;

        // Experience stats: cards stagger 0.15s apart; each counter runs
        // 2 seconds and arms exactly once.
        let stats = engine.mount_section(Section::new(SectionConfig {
            name: "stats".into(),
            bounds: layout.stats,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.2)?),
            pair: self.reveal_pair(0.5, StaggerSchedule::new(0.0, 0.15)?)?,
            child_count: 1 + content.stats.len(),
        })?);
        let stat_icons = engine.mount_section(Section::new(SectionConfig {
            name: "stat-icons".into(),
            bounds: layout.stats,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.2)?),
            pair: self.emphasis_pair(StaggerSchedule::new(0.0, 0.15)?)?,
            child_count: content.stats.len(),
        })?);
        let stat_counters = content
            .stats
            .iter()
            .map(|stat| {
                engine.add_counter(stats, StatCounter::new(stat.target, 2.0, Ease::OutCubic)?)
            })
            .collect::<RevelaResult<Vec<_>>>()?;
        let stat_hovers = content
            .stats
            .iter()
            .map(|_| engine.add_hover(stats, HoverMachine::lift(-8.0, 1.05)?))
            .collect::<RevelaResult<Vec<_>>>()?;

        // Studio: header, lede, and one card per feature.
        let studio = engine.mount_section(Section::new(SectionConfig {
            name: "studio".into(),
            bounds: layout.studio,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.0)?),
            pair: self.reveal_pair(0.5, group)?,
            child_count: 2 + content.studio_features.len(),
        })?);
        let studio_hovers = content
            .studio_features
            .iter()
            .map(|_| engine.add_hover(studio, HoverMachine::lift(-8.0, 1.02)?))
            .collect::<RevelaResult<Vec<_>>>()?;

        // Team roster: header plus one card per member.
        let team = engine.mount_section(Section::new(SectionConfig {
            name: "team".into(),
            bounds: layout.team,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.1)?),
            pair: self.reveal_pair(0.5, group)?,
            child_count: 1 + content.team.len(),
        })?);
        let team_hovers = content
            .team
            .iter()
            .map(|_| engine.add_hover(team, HoverMachine::lift(-8.0, 1.0)?))
            .collect::<RevelaResult<Vec<_>>>()?;

        // Call to action: heading, body, buttons land 0.2s apart; the
        // aperture icon pops in on its own.
        let cta = engine.mount_section(Section::new(SectionConfig {
            name: "cta".into(),
            bounds: layout.cta,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.0)?),
            pair: self.reveal_pair(0.5, StaggerSchedule::new(0.0, 0.2)?)?,
            child_count: 3,
        })?);
        let cta_icon = engine.mount_section(Section::new(SectionConfig {
            name: "cta-icon".into(),
            bounds: layout.cta,
            mode: TriggerMode::OnVisible(TriggerConfig::once(0.0)?),
            pair: self.emphasis_pair(StaggerSchedule::none())?,
            child_count: 1,
        })?);

        tracing::debug!(
            values = content.values.len(),
            stats = content.stats.len(),
            team = content.team.len(),
            "page composed"
        );

        Ok(Page {
            hero,
            hero_icon,
            hero_parallax,
            story,
            story_parallax,
            values,
            value_icons,
            value_hovers,
            stats,
            stat_icons,
            stat_counters,
            stat_hovers,
            studio,
            studio_hovers,
            team,
            team_hovers,
            cta,
            cta_icon,
            primary_nav: content.cta.primary_target,
            secondary_nav: content.cta.secondary_target,
        })
    }
}
