//! Bolt circle hole placement.

use std::f64::consts::TAU;
use std::iter::FusedIterator;

use partgen_ir::Point2D;
use partgen_math::{polar, polar_angle, Point2};

/// A circular cutout position on the sketch plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePlacement {
    /// Center X.
    pub x: f64,
    /// Center Y.
    pub y: f64,
    /// Hole radius.
    pub radius: f64,
}

impl HolePlacement {
    /// Hole center.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Polar angle of the center, radians in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        polar_angle(&Point2::new(self.x, self.y))
    }
}

/// `count` equally spaced holes on a circle.
///
/// A plain value: iterate it as many times as needed, each pass yields the
/// same placements in the same order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltHoles {
    pitch_radius: f64,
    hole_radius: f64,
    count: u32,
}

impl BoltHoles {
    /// Number of holes.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// True when there are no holes.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Placement of hole `i`, or `None` past the end.
    pub fn get(&self, i: u32) -> Option<HolePlacement> {
        if i >= self.count {
            return None;
        }
        let angle = TAU * i as f64 / self.count as f64;
        let c = polar(self.pitch_radius, angle);
        Some(HolePlacement {
            x: c.x,
            y: c.y,
            radius: self.hole_radius,
        })
    }

    /// Iterate the placements from hole 0.
    pub fn iter(&self) -> HolePlacements {
        HolePlacements {
            holes: *self,
            front: 0,
            back: self.count,
        }
    }
}

impl IntoIterator for BoltHoles {
    type Item = HolePlacement;
    type IntoIter = HolePlacements;

    fn into_iter(self) -> HolePlacements {
        self.iter()
    }
}

impl IntoIterator for &BoltHoles {
    type Item = HolePlacement;
    type IntoIter = HolePlacements;

    fn into_iter(self) -> HolePlacements {
        self.iter()
    }
}

/// Iterator over [`BoltHoles`], computing each placement on demand.
#[derive(Debug, Clone)]
pub struct HolePlacements {
    holes: BoltHoles,
    front: u32,
    back: u32,
}

impl Iterator for HolePlacements {
    type Item = HolePlacement;

    fn next(&mut self) -> Option<HolePlacement> {
        if self.front >= self.back {
            return None;
        }
        let placement = self.holes.get(self.front);
        self.front += 1;
        placement
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.back - self.front) as usize;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for HolePlacements {
    fn next_back(&mut self) -> Option<HolePlacement> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.holes.get(self.back)
    }
}

impl ExactSizeIterator for HolePlacements {}

impl FusedIterator for HolePlacements {}

/// Holes of `hole_diameter` at `i · 360° / num_holes` on a circle of
/// `pitch_circle_diameter`, starting on +X and going counter-clockwise.
///
/// Zero holes gives an empty sequence.
pub fn compute_bolt_hole_placements(
    pitch_circle_diameter: f64,
    num_holes: u32,
    hole_diameter: f64,
) -> BoltHoles {
    BoltHoles {
        pitch_radius: pitch_circle_diameter / 2.0,
        hole_radius: hole_diameter / 2.0,
        count: num_holes,
    }
}
