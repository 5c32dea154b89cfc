use std::collections::BTreeMap;

use crate::{
    core::Vec2,
    ease::Ease,
    error::{RevelaError, RevelaResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Closed set of animatable properties. Every variant targets all of them,
/// so any hidden/visible pair interpolates without holes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertySet {
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
    pub rotation_deg: f64,
}

impl Default for PropertySet {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl PropertySet {
    pub fn validate(&self) -> RevelaResult<()> {
        let finite = self.opacity.is_finite()
            && self.translate.x.is_finite()
            && self.translate.y.is_finite()
            && self.scale.is_finite()
            && self.rotation_deg.is_finite();
        if !finite {
            return Err(RevelaError::validation("property set must be finite"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(RevelaError::validation("opacity must be in 0..=1"));
        }
        Ok(())
    }
}

impl Lerp for PropertySet {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotation_deg: <f64 as Lerp>::lerp(&a.rotation_deg, &b.rotation_deg, t),
        }
    }
}

/// Replays of a transition after its first run. `Count(n)` plays `n` extra
/// times and rests on the target; `Forever` loops until retargeted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    #[default]
    None,
    Count(u32),
    Forever,
}

/// How an element moves toward a variant's property targets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub duration_secs: f64,
    pub ease: Ease,
    pub delay_secs: f64,
    /// Extra delay added per child index when this variant reveals a group.
    pub stagger_children_secs: f64,
    /// Base delay applied to every child of the group.
    pub delay_children_secs: f64,
    #[serde(default)]
    pub repeat: Repeat,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            ease: Ease::OutCubic,
            delay_secs: 0.0,
            stagger_children_secs: 0.0,
            delay_children_secs: 0.0,
            repeat: Repeat::None,
        }
    }
}

impl Transition {
    /// Child delay schedule implied by this transition's group settings.
    pub fn stagger(&self) -> crate::stagger::StaggerSchedule {
        crate::stagger::StaggerSchedule {
            base_delay_secs: self.delay_children_secs.max(0.0),
            interval_secs: self.stagger_children_secs.max(0.0),
        }
    }

    pub fn validate(&self) -> RevelaResult<()> {
        let vals = [
            self.duration_secs,
            self.delay_secs,
            self.stagger_children_secs,
            self.delay_children_secs,
        ];
        if vals.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(RevelaError::validation(
                "transition times must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Variant {
    pub props: PropertySet,
    pub transition: Transition,
}

impl Variant {
    pub fn new(props: PropertySet) -> Self {
        Self {
            props,
            transition: Transition::default(),
        }
    }

    pub fn with_transition(props: PropertySet, transition: Transition) -> Self {
        Self { props, transition }
    }

    pub fn validate(&self) -> RevelaResult<()> {
        self.props.validate()?;
        self.transition.validate()
    }
}

pub const HIDDEN: &str = "hidden";
pub const VISIBLE: &str = "visible";
pub const EMPHASIS: &str = "emphasis";

/// Named, immutable variant definitions shared by every element that uses
/// them. Registered once, never mutated afterward.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Variant>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the three variants the page shares:
    /// `hidden` (faded, shifted down), `visible` (identity), and
    /// `emphasis` (scaled to zero and wound back, popping in with overshoot).
    pub fn builtin() -> Self {
        let mut variants = BTreeMap::new();
        variants.insert(
            HIDDEN.to_string(),
            Variant::new(PropertySet {
                opacity: 0.0,
                translate: Vec2::new(0.0, 40.0),
                ..PropertySet::default()
            }),
        );
        variants.insert(
            VISIBLE.to_string(),
            Variant::new(PropertySet::default()),
        );
        variants.insert(
            EMPHASIS.to_string(),
            Variant::with_transition(
                PropertySet {
                    opacity: 0.0,
                    scale: 0.0,
                    rotation_deg: -180.0,
                    ..PropertySet::default()
                },
                Transition {
                    duration_secs: 0.6,
                    ease: Ease::OutBack,
                    ..Transition::default()
                },
            ),
        );
        Self { variants }
    }

    pub fn register(&mut self, name: impl Into<String>, variant: Variant) -> RevelaResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RevelaError::validation("variant name must be non-empty"));
        }
        variant.validate()?;
        if self.variants.contains_key(&name) {
            return Err(RevelaError::validation(format!(
                "duplicate variant '{name}'"
            )));
        }
        self.variants.insert(name, variant);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> RevelaResult<&Variant> {
        self.variants
            .get(name)
            .ok_or_else(|| RevelaError::unknown_variant(name))
    }

    /// Runtime-degradation lookup: an unknown name falls back to the fully
    /// revealed state so content never vanishes over a typo.
    pub fn resolve_or_visible(&self, name: &str) -> Variant {
        match self.variants.get(name) {
            Some(v) => v.clone(),
            None => {
                tracing::warn!(variant = name, "unknown variant, falling back to visible");
                self.variants
                    .get(VISIBLE)
                    .cloned()
                    .unwrap_or_else(|| Variant::new(PropertySet::default()))
            }
        }
    }

    pub fn pair(&self, hidden: &str, visible: &str) -> RevelaResult<VariantPair> {
        VariantPair::new(self.resolve(hidden)?.clone(), self.resolve(visible)?.clone())
    }
}

/// The hidden/visible pairing a section animates between.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariantPair {
    pub hidden: Variant,
    pub visible: Variant,
}

impl VariantPair {
    pub fn new(hidden: Variant, visible: Variant) -> RevelaResult<Self> {
        hidden.validate()?;
        visible.validate()?;
        Ok(Self { hidden, visible })
    }
}
