#![forbid(unsafe_code)]

pub mod compose;
pub mod content;
pub mod core;
pub mod counter;
pub mod ease;
pub mod engine;
pub mod error;
pub mod hover;
pub mod mapper;
pub mod scroll;
pub mod section;
pub mod stagger;
pub mod tween;
pub mod variant;
pub mod viewport;

pub use compose::{AmbientLayer, NoAmbient, Page, PageComposer, PageLayout};
pub use content::{NavTarget, PageContent};
pub use crate::core::{ElementBounds, Vec2, Viewport};
pub use counter::StatCounter;
pub use ease::Ease;
pub use engine::{CounterId, Engine, HoverId, ParallaxId, SectionId};
pub use error::{RevelaError, RevelaResult};
pub use hover::{HoverMachine, HoverState};
pub use mapper::RangeMap;
pub use scroll::{ScrollOffsets, ScrollTracker};
pub use section::{Section, SectionConfig};
pub use stagger::StaggerSchedule;
pub use tween::Tween;
pub use variant::{PropertySet, Repeat, Transition, Variant, VariantPair, VariantRegistry};
pub use viewport::{TriggerConfig, TriggerEvent, TriggerMode, TriggerRegion};
