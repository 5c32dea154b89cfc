use crate::core::{ElementBounds, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Edge {
    Start,
    End,
}

/// One endpoint of a scroll transit: "this element edge meets that viewport
/// edge". `element: Start, viewport: End` reads as "element's top edge
/// reaches the viewport bottom".
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgePair {
    pub element: Edge,
    pub viewport: Edge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffsets {
    pub start: EdgePair,
    pub end: EdgePair,
}

impl ScrollOffsets {
    /// The full transit: progress 0 the moment the element starts entering
    /// from the bottom, 1 the moment it finishes leaving at the top.
    pub fn enter_to_exit() -> Self {
        Self {
            start: EdgePair {
                element: Edge::Start,
                viewport: Edge::End,
            },
            end: EdgePair {
                element: Edge::End,
                viewport: Edge::Start,
            },
        }
    }
}

/// Normalized scroll progress for one tracked element. Trackers are plain
/// values: many can exist at once and they share nothing but the scroll
/// position they are handed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTracker {
    pub offsets: ScrollOffsets,
}

impl ScrollTracker {
    pub fn new(offsets: ScrollOffsets) -> Self {
        Self { offsets }
    }

    fn alignment_scroll(pair: EdgePair, bounds: ElementBounds, viewport: Viewport) -> f64 {
        let element_edge = match pair.element {
            Edge::Start => bounds.top,
            Edge::End => bounds.bottom(),
        };
        let viewport_offset = match pair.viewport {
            Edge::Start => 0.0,
            Edge::End => viewport.height,
        };
        element_edge - viewport_offset
    }

    /// Progress through the transit, clamped to [0,1] — never extrapolated.
    pub fn progress(&self, bounds: ElementBounds, viewport: Viewport) -> f64 {
        let start = Self::alignment_scroll(self.offsets.start, bounds, viewport);
        let end = Self::alignment_scroll(self.offsets.end, bounds, viewport);
        let span = end - start;
        if span <= 0.0 {
            // Degenerate transit collapses to a step at the start point.
            return if viewport.scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((viewport.scroll_y - start) / span).clamp(0.0, 1.0)
    }
}
