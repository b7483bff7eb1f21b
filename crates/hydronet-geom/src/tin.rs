// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Triangulated irregular network surfaces.

use serde::{Deserialize, Serialize};

use crate::{Bounds, Point};

/// Barycentric slack that still counts a point as on a triangle edge.
const EDGE_SLACK: f64 = 1e-9;

/// Surface vertex: a planar position with an elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Planar position.
    pub point: Point,
    /// Elevation.
    pub z: f64,
}

impl SurfacePoint {
    /// Creates a surface vertex.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point::new(x, y),
            z,
        }
    }
}

/// One planar face of a [`Tin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [SurfacePoint; 3],
}

impl Triangle {
    /// Face through three vertices, in any winding.
    #[must_use]
    pub const fn new(a: SurfacePoint, b: SurfacePoint, c: SurfacePoint) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// The three vertices in construction order.
    #[must_use]
    pub const fn vertices(&self) -> &[SurfacePoint; 3] {
        &self.vertices
    }

    fn doubled_area(&self) -> f64 {
        let [a, b, c] = self.vertices.map(|v| v.point);
        (b - a).cross(c - a)
    }

    /// Barycentric weights of `p`; `None` when the face has no area.
    ///
    /// All weights are non-negative exactly when `p` lies inside or on the
    /// face, and they sum to one.
    #[must_use]
    pub fn weights(&self, p: Point) -> Option<[f64; 3]> {
        let d = self.doubled_area();
        if !d.is_normal() {
            return None;
        }
        let [a, b, c] = self.vertices.map(|v| v.point);
        let wa = (b - p).cross(c - p) / d;
        let wb = (c - p).cross(a - p) / d;
        Some([wa, wb, 1.0 - wa - wb])
    }

    /// Elevation of the face plane at `p`, if `p` lies inside or on an edge.
    #[must_use]
    pub fn elevation(&self, p: Point) -> Option<f64> {
        let w = self.weights(p)?;
        if w.iter().any(|&x| x < -EDGE_SLACK) {
            return None;
        }
        Some(
            w.iter()
                .zip(&self.vertices)
                .map(|(w, v)| w * v.z)
                .sum(),
        )
    }
}

/// A surface made of triangular faces.
///
/// Lookups scan faces in order behind a per-face bounding box check; the
/// first face containing the point answers, so shared edges resolve to the
/// earlier face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tin {
    faces: Vec<(Triangle, Bounds)>,
}

impl Tin {
    /// Surface over `faces`. Faces without area are kept but never answer.
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = Triangle>) -> Self {
        Self {
            faces: faces
                .into_iter()
                .map(|t| {
                    let corners = t.vertices().map(|v| v.point);
                    (t, Bounds::from_points(&corners))
                })
                .collect(),
        }
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// `true` when the surface has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Surface elevation at `p`; `None` outside every face.
    #[must_use]
    pub fn elevation(&self, p: Point) -> Option<f64> {
        self.faces
            .iter()
            .filter(|(_, b)| b.contains(p))
            .find_map(|(t, _)| t.elevation(p))
    }
}
