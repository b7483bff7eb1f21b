// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned planar bounding box.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Containment is inclusive on the edges.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Builds the box spanned by two corners in any order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Point {
        self.max
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Builds the minimal box containing all `points`.
    ///
    /// An empty slice yields the degenerate box at the origin.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new(Point::default(), Point::default());
        };
        rest.iter().fold(Self::new(*first, *first), |acc, p| acc.include(*p))
    }

    /// Grows the box to contain `p`.
    #[must_use]
    pub fn include(&self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.include(other.min).include(other.max)
    }

    /// Inflates the box by a uniform margin `m` on every side.
    #[must_use]
    pub fn inflate(&self, m: f64) -> Self {
        Self {
            min: Point::new(self.min.x - m, self.min.y - m),
            max: Point::new(self.max.x + m, self.max.y + m),
        }
    }

    /// Grows each axis by `ratio` of its extent on both sides.
    #[must_use]
    pub fn expand_relative(&self, ratio: f64) -> Self {
        let dx = self.width() * ratio;
        let dy = self.height() * ratio;
        Self {
            min: Point::new(self.min.x - dx, self.min.y - dy),
            max: Point::new(self.max.x + dx, self.max.y + dy),
        }
    }

    /// Returns `true` if `p` lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::Bounds;
    use crate::Point;

    #[test]
    fn from_points_and_contains() {
        let b = Bounds::from_points(&[
            Point::new(2.0, -1.0),
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(b.min(), Point::new(-3.0, -1.0));
        assert_eq!(b.max(), Point::new(2.0, 4.0));
        assert!(b.contains(Point::new(2.0, 4.0)));
        assert!(!b.contains(Point::new(2.1, 0.0)));
        assert!(b.inflate(0.2).contains(Point::new(2.1, 0.0)));
    }

    #[test]
    fn relative_expansion_and_union() {
        let b = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0)).expand_relative(0.1);
        assert_eq!(b.min(), Point::new(-1.0, -2.0));
        assert_eq!(b.max(), Point::new(11.0, 22.0));

        let u = b.union(&Bounds::new(Point::new(50.0, 50.0), Point::new(51.0, 51.0)));
        assert_eq!(u.max(), Point::new(51.0, 51.0));
        assert_eq!(u.min(), Point::new(-1.0, -2.0));
    }
}
