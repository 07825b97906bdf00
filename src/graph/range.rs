//! Visible horizontal interval.

use crate::error::{GraphError, Result};

/// Visible x interval. Always finite with `left < right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    left: f64,
    right: f64,
}

impl Range {
    /// Validate and build a range.
    pub fn new(left: f64, right: f64) -> Result<Self> {
        if left.is_finite() && right.is_finite() && left < right {
            Ok(Self { left, right })
        } else {
            Err(GraphError::range_invalid(left, right))
        }
    }

    /// Left limit.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Right limit.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Midpoint of the interval.
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Whether `x` lies inside, limits included.
    pub fn contains(&self, x: f64) -> bool {
        (self.left..=self.right).contains(&x)
    }

    /// Move `[left, right]` inside `[-max_extent, max_extent]`, shifting the
    /// window rather than shrinking it. Wider windows become the full extent.
    fn fit(left: f64, right: f64, max_extent: f64) -> Result<Self> {
        let width = right - left;
        if width >= 2.0 * max_extent {
            return Self::new(-max_extent, max_extent);
        }
        if left < -max_extent {
            Self::new(-max_extent, -max_extent + width)
        } else if right > max_extent {
            Self::new(max_extent - width, max_extent)
        } else {
            Self::new(left, right)
        }
    }

    /// Shift by `dx`, stopping at `[-max_extent, max_extent]`.
    pub fn shift(&self, dx: f64, max_extent: f64) -> Result<Self> {
        Self::fit(self.left + dx, self.right + dx, max_extent)
    }

    /// Shift by `fraction` of the width (positive moves right).
    pub fn pan(&self, fraction: f64, max_extent: f64) -> Result<Self> {
        self.shift(self.width() * fraction, max_extent)
    }

    /// Scale the width by `factor` around `pivot` (factor < 1 zooms in),
    /// never reaching past `[-max_extent, max_extent]`.
    pub fn zoom(&self, factor: f64, pivot: f64, max_extent: f64) -> Result<Self> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(GraphError::range_invalid(self.left, self.right));
        }
        let left = pivot - (pivot - self.left) * factor;
        let right = pivot + (self.right - pivot) * factor;
        Self::fit(left, right, max_extent)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            left: -10.0,
            right: 10.0,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_empty_and_non_finite_bounds() {
        assert!(Range::new(1.0, -1.0).is_err());
        assert!(Range::new(2.0, 2.0).is_err());
        assert!(Range::new(f64::NAN, 1.0).is_err());
        assert!(Range::new(0.0, f64::INFINITY).is_err());
        assert!(Range::new(-1.0, 1.0).is_ok());
    }

    #[test]
    fn default_is_symmetric_ten() {
        let r = Range::default();
        assert_eq!((r.left(), r.right()), (-10.0, 10.0));
        assert_eq!(r.to_string(), "[-10, 10]");
    }

    #[test]
    fn pan_keeps_width() {
        let r = Range::default().pan(0.1, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (-8.0, 12.0));
    }

    #[test]
    fn pan_stops_at_the_extent() {
        let r = Range::new(9_990.0, 10_000.0).unwrap().pan(0.5, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (9_990.0, 10_000.0));
        let r = Range::new(-9_995.0, -9_985.0).unwrap().pan(-1.0, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (-10_000.0, -9_990.0));
    }

    #[test]
    fn zoom_outside_the_extent_moves_back_inside() {
        let far = Range::new(20_000.0, 20_020.0).unwrap();
        let r = far.zoom(0.8, far.center(), 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (9_984.0, 10_000.0));

        let r = Range::new(9_000.0, 10_000.0).unwrap().zoom(1.25, 9_500.0, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (8_750.0, 10_000.0));
    }

    #[test]
    fn zoom_around_pivot() {
        let r = Range::default().zoom(0.5, 0.0, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (-5.0, 5.0));

        let r = Range::new(0.0, 4.0).unwrap().zoom(2.0, 1.0, 10_000.0).unwrap();
        assert_eq!((r.left(), r.right()), (-1.0, 7.0));
    }

    #[test]
    fn zoom_out_is_clamped() {
        let r = Range::new(-9_000.0, 9_000.0)
            .unwrap()
            .zoom(2.0, 0.0, 10_000.0)
            .unwrap();
        assert_eq!((r.left(), r.right()), (-10_000.0, 10_000.0));
        assert!(Range::default().zoom(0.0, 0.0, 10_000.0).is_err());
    }
}
