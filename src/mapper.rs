use crate::{
    error::{RevelaError, RevelaResult},
    variant::Lerp,
};

/// Piecewise-linear lookup over ordered `(input, output)` breakpoints.
/// Inputs below the first breakpoint clamp to its output, inputs above the
/// last clamp to the last output; in between, linear interpolation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RangeMap<T> {
    breakpoints: Vec<(f64, T)>,
    #[serde(skip)]
    last: Option<(f64, T)>,
}

impl<T> RangeMap<T>
where
    T: Lerp + Clone + PartialEq,
{
    pub fn new(breakpoints: Vec<(f64, T)>) -> RevelaResult<Self> {
        if breakpoints.len() < 2 {
            return Err(RevelaError::validation(
                "range map needs at least two breakpoints",
            ));
        }
        if breakpoints.iter().any(|(x, _)| !x.is_finite()) {
            return Err(RevelaError::validation(
                "range map inputs must be finite",
            ));
        }
        if !breakpoints.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(RevelaError::validation(
                "range map inputs must be strictly ascending",
            ));
        }
        Ok(Self {
            breakpoints,
            last: None,
        })
    }

    /// Two-point convenience, the common parallax shape (`0.0 -> 0.3`).
    pub fn linear(in0: f64, out0: T, in1: f64, out1: T) -> RevelaResult<Self> {
        Self::new(vec![(in0, out0), (in1, out1)])
    }

    /// Pure lookup; no state touched.
    pub fn map(&self, input: f64) -> T {
        let keys = &self.breakpoints;
        let idx = keys.partition_point(|(x, _)| *x <= input);
        if idx == 0 {
            return keys[0].1.clone();
        }
        if idx >= keys.len() {
            return keys[keys.len() - 1].1.clone();
        }
        let (xa, ref a) = keys[idx - 1];
        let (xb, ref b) = keys[idx];
        let t = (input - xa) / (xb - xa);
        T::lerp(a, b, t)
    }

    /// Lookup that memoizes the last `(input, output)` pair so a stream of
    /// identical scroll readings costs one interpolation.
    pub fn map_memo(&mut self, input: f64) -> T {
        if let Some((last_in, ref last_out)) = self.last
            && last_in == input
        {
            return last_out.clone();
        }
        let out = self.map(input);
        self.last = Some((input, out.clone()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_exactly_between_breakpoints() {
        let map = RangeMap::linear(0.0, 0.0, 1.0, 30.0).unwrap();
        assert_eq!(map.map(0.5), 15.0);
        assert_eq!(map.map(0.0), 0.0);
        assert_eq!(map.map(1.0), 30.0);
    }

    #[test]
    fn clamps_outside_the_domain() {
        let map = RangeMap::linear(0.0, 0.0, 1.0, 30.0).unwrap();
        assert_eq!(map.map(-0.5), 0.0);
        assert_eq!(map.map(1.5), 30.0);
    }

    #[test]
    fn multi_segment_lookup_picks_the_right_span() {
        let map = RangeMap::new(vec![(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)]).unwrap();
        assert_eq!(map.map(0.25), 5.0);
        assert_eq!(map.map(0.75), 5.0);
        assert_eq!(map.map(0.5), 10.0);
    }

    #[test]
    fn unsorted_or_short_breakpoints_are_rejected() {
        assert!(RangeMap::new(vec![(0.0, 1.0)]).is_err());
        assert!(RangeMap::new(vec![(0.5, 0.0), (0.5, 1.0)]).is_err());
        assert!(RangeMap::new(vec![(1.0, 0.0), (0.0, 1.0)]).is_err());
    }

    #[test]
    fn memo_returns_cached_output_for_repeated_input() {
        let mut map = RangeMap::linear(0.0, 0.0, 1.0, 30.0).unwrap();
        assert_eq!(map.map_memo(0.5), 15.0);
        assert_eq!(map.map_memo(0.5), 15.0);
        assert_eq!(map.map_memo(0.25), 7.5);
    }

    #[test]
    fn maps_negative_offsets_for_parallax() {
        // The story section's -20% -> 20% drift.
        let map = RangeMap::linear(0.0, -0.2f64, 1.0, 0.2).unwrap();
        assert!((map.map(0.5) - 0.0).abs() < 1e-12);
        assert_eq!(map.map(-1.0), -0.2);
    }
}
