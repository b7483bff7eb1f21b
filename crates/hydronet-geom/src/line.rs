// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::point::{Point, Vec2};

/// Ordered polyline with at least two finite vertices.
///
/// Construction enforces arity and finiteness only. Zero length and
/// start/end coincidence depend on the caller's tolerance and are checked at
/// network ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LineString {
    vertices: Vec<Point>,
}

impl LineString {
    /// Builds a line string from its vertices.
    ///
    /// # Errors
    /// [`GeometryError::TooFewVertices`] for fewer than two vertices and
    /// [`GeometryError::NonFinite`] for NaN/infinite coordinates.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                found: vertices.len(),
            });
        }
        if !vertices.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        Ok(Self { vertices })
    }

    /// All vertices, first to last.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Consumes the line and returns its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Number of vertices (always ≥ 2).
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of segments (always ≥ 1).
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.vertices.len() - 1
    }

    /// First vertex.
    #[must_use]
    pub fn first(&self) -> Point {
        self.vertices[0]
    }

    /// Last vertex.
    #[must_use]
    pub fn last(&self) -> Point {
        self.vertices[self.vertices.len() - 1]
    }

    /// Vertices strictly between the two ends.
    #[must_use]
    pub fn interior(&self) -> &[Point] {
        &self.vertices[1..self.vertices.len() - 1]
    }

    /// Sum of the Euclidean segment lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Iterates the segments in vertex order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Tight bounds of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }

    /// Same line with its first and last vertex replaced.
    #[must_use]
    pub fn with_endpoints(mut self, start: Point, end: Point) -> Self {
        let last = self.vertices.len() - 1;
        self.vertices[0] = start;
        self.vertices[last] = end;
        self
    }

    /// Cuts the line at an interior vertex, sharing it between both parts.
    ///
    /// Returns `None` when `index` is the first or last vertex (or out of
    /// range): cutting there would leave a part with a single vertex.
    #[must_use]
    pub fn split_at_vertex(&self, index: usize) -> Option<(Self, Self)> {
        if index == 0 || index + 1 >= self.vertices.len() {
            return None;
        }
        Some((
            Self {
                vertices: self.vertices[..=index].to_vec(),
            },
            Self {
                vertices: self.vertices[index..].to_vec(),
            },
        ))
    }

    /// Cuts segment `segment` at `at`, which becomes the last vertex of the
    /// first part and the first vertex of the second.
    ///
    /// Returns `None` when `segment` is out of range or `at` is not finite.
    #[must_use]
    pub fn split_at_point(&self, segment: usize, at: Point) -> Option<(Self, Self)> {
        if segment >= self.num_segments() || !at.is_finite() {
            return None;
        }
        let mut head = self.vertices[..=segment].to_vec();
        head.push(at);
        let mut tail = Vec::with_capacity(self.vertices.len() - segment);
        tail.push(at);
        tail.extend_from_slice(&self.vertices[segment + 1..]);
        Some((Self { vertices: head }, Self { vertices: tail }))
    }
}

impl TryFrom<Vec<Point>> for LineString {
    type Error = GeometryError;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<LineString> for Vec<Point> {
    fn from(line: LineString) -> Self {
        line.vertices
    }
}

/// Straight piece `[a, b]` of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start vertex.
    pub a: Point,
    /// End vertex.
    pub b: Point,
}

impl Segment {
    /// Creates a segment.
    #[must_use]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Expresses `p` in the segment's local frame.
    ///
    /// The frame origin is `a` and its first axis points to `b`. The sine of
    /// the axis angle takes the sign of `b.y - a.y`, so the sign of the
    /// perpendicular offset is deterministic; only its magnitude matters to
    /// callers. Returns `None` for a zero-length segment.
    #[must_use]
    pub fn frame(&self, p: Point) -> Option<SegmentFrame> {
        let ab = self.b - self.a;
        let length = ab.norm();
        if length <= 0.0 || !length.is_finite() {
            return None;
        }
        let cos = ab.x / length;
        let sin = (1.0 - cos * cos).max(0.0).sqrt().copysign(ab.y);
        let dir = Vec2::new(cos, sin);
        let ap = p - self.a;
        Some(SegmentFrame {
            origin: self.a,
            dir,
            along: ap.dot(dir),
            offset: ap.dot(Vec2::new(-sin, cos)),
            length,
        })
    }
}

/// A point projected into a segment's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFrame {
    origin: Point,
    dir: Vec2,
    /// Along-track distance from the segment start.
    pub along: f64,
    /// Signed perpendicular distance to the segment's supporting line.
    pub offset: f64,
    /// Segment length.
    pub length: f64,
}

impl SegmentFrame {
    /// The foot of the perpendicular: the point at `along` on the segment line.
    #[must_use]
    pub fn projection(&self) -> Point {
        self.origin + self.dir * self.along
    }
}
