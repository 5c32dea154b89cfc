use crate::error::{RevelaError, RevelaResult};

pub use kurbo::Vec2;

/// Window scroll state in document coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> RevelaResult<Self> {
        if !scroll_y.is_finite() || !height.is_finite() {
            return Err(RevelaError::validation("viewport values must be finite"));
        }
        if height <= 0.0 {
            return Err(RevelaError::validation("viewport height must be > 0"));
        }
        Ok(Self { scroll_y, height })
    }

    /// Document coordinate of the viewport's top edge.
    pub fn top(self) -> f64 {
        self.scroll_y
    }

    /// Document coordinate of the viewport's bottom edge.
    pub fn bottom(self) -> f64 {
        self.scroll_y + self.height
    }
}

/// A laid-out element's position in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64) -> RevelaResult<Self> {
        if !top.is_finite() || !height.is_finite() {
            return Err(RevelaError::validation("element bounds must be finite"));
        }
        if height < 0.0 {
            return Err(RevelaError::validation("element height must be >= 0"));
        }
        Ok(Self { top, height })
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Fraction of the element's extent inside the viewport, in [0,1].
    /// Zero-height elements report 1.0 when their position is inside the
    /// viewport and 0.0 otherwise.
    pub fn visible_fraction(self, viewport: Viewport) -> f64 {
        if self.height == 0.0 {
            let inside = self.top >= viewport.top() && self.top <= viewport.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap_top = self.top.max(viewport.top());
        let overlap_bottom = self.bottom().min(viewport.bottom());
        ((overlap_bottom - overlap_top) / self.height).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_degenerate_height() {
        assert!(Viewport::new(0.0, 0.0).is_err());
        assert!(Viewport::new(0.0, f64::NAN).is_err());
        assert!(Viewport::new(120.0, 800.0).is_ok());
    }

    #[test]
    fn visible_fraction_covers_partial_overlap() {
        let vp = Viewport::new(0.0, 800.0).unwrap();
        let el = ElementBounds::new(600.0, 400.0).unwrap();
        // 200 of 400 px inside the viewport.
        assert_eq!(el.visible_fraction(vp), 0.5);
    }

    #[test]
    fn visible_fraction_clamps_outside() {
        let vp = Viewport::new(0.0, 800.0).unwrap();
        let above = ElementBounds::new(-500.0, 300.0).unwrap();
        let below = ElementBounds::new(900.0, 300.0).unwrap();
        let inside = ElementBounds::new(100.0, 300.0).unwrap();
        assert_eq!(above.visible_fraction(vp), 0.0);
        assert_eq!(below.visible_fraction(vp), 0.0);
        assert_eq!(inside.visible_fraction(vp), 1.0);
    }

    #[test]
    fn zero_height_element_uses_point_containment() {
        let vp = Viewport::new(100.0, 800.0).unwrap();
        let at = ElementBounds::new(400.0, 0.0).unwrap();
        let out = ElementBounds::new(50.0, 0.0).unwrap();
        assert_eq!(at.visible_fraction(vp), 1.0);
        assert_eq!(out.visible_fraction(vp), 0.0);
    }
}
