#![warn(missing_docs)]

//! Math types for partgen profile generation.
//!
//! Thin wrappers around nalgebra providing the handful of 2D helpers the
//! profile generator needs: points in the sketch plane, polar placement,
//! mirroring, polygon area, and a linear tolerance.

use std::f64::consts::TAU;

/// A point in the 2D sketch plane.
pub type Point2 = nalgebra::Point2<f64>;

/// Point at `radius` from the origin, `angle` radians counter-clockwise from +X.
pub fn polar(radius: f64, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    Point2::new(radius * c, radius * s)
}

/// Mirror a point across the Y axis (negate X).
pub fn mirror_y(p: &Point2) -> Point2 {
    Point2::new(-p.x, p.y)
}

/// Polar angle of `p` normalized to `[0, 2π)`.
pub fn polar_angle(p: &Point2) -> f64 {
    let a = p.y.atan2(p.x);
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Signed area of a closed polyline (shoelace formula).
///
/// Positive for counter-clockwise winding.
pub fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

/// Tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
}

impl Tolerance {
    /// Default CAD tolerance (1e-6 mm).
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_polar_quarter_turn() {
        let p = polar(15.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert_relative_eq!(p.y, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_y() {
        let p = mirror_y(&Point2::new(3.0, 4.0));
        assert_eq!(p, Point2::new(-3.0, 4.0));
    }

    #[test]
    fn test_polar_angle_wraps_negative() {
        let a = polar_angle(&Point2::new(0.0, -2.0));
        assert_relative_eq!(a, 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_area_square() {
        let ccw = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(signed_area(&ccw), 4.0);

        let mut cw = ccw;
        cw.reverse();
        assert_relative_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_signed_area_degenerate() {
        assert_eq!(signed_area(&[Point2::origin(), Point2::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(1.0, 2.0);
        assert!(tol.points_equal(&a, &Point2::new(1.0 + 1e-7, 2.0)));
        assert!(!tol.points_equal(&a, &Point2::new(1.001, 2.0)));
    }
}
