// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Greedy endpoint clustering.
//!
//! Endpoints are swept in ascending x order. Each sweep opens a cluster at the
//! lowest remaining x and absorbs every pending endpoint within the tolerance
//! of any current member, so clusters may chain beyond twice the tolerance.

use std::collections::BTreeMap;

use hydronet_geom::{LineString, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which end of a line an endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// First vertex.
    Start,
    /// Last vertex.
    End,
}

/// A line endpoint tagged with its owner line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    /// Index of the owning line in the caller's input.
    pub line: usize,
    /// Start or end.
    pub polarity: Polarity,
    /// Coordinate.
    pub point: Point,
}

impl Endpoint {
    /// The start and end endpoints of `line`, tagged with `index`.
    #[must_use]
    pub fn of_line(index: usize, line: &LineString) -> [Self; 2] {
        [
            Self {
                line: index,
                polarity: Polarity::Start,
                point: line.first(),
            },
            Self {
                line: index,
                polarity: Polarity::End,
                point: line.last(),
            },
        ]
    }
}

/// Running state of an open cluster.
struct Cluster {
    members: Vec<Point>,
    sum_x: f64,
    sum_y: f64,
}

impl Cluster {
    fn open(p: Point) -> Self {
        Self {
            members: vec![p],
            sum_x: p.x,
            sum_y: p.y,
        }
    }

    fn absorb(&mut self, p: Point) {
        self.members.push(p);
        self.sum_x += p.x;
        self.sum_y += p.y;
    }

    fn min_x_distance(&self, p: Point) -> f64 {
        self.members
            .iter()
            .map(|m| m.x_distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn reaches(&self, p: Point, tolerance: f64) -> bool {
        self.members.iter().any(|m| m.distance(p) <= tolerance)
    }

    #[allow(clippy::cast_precision_loss)]
    fn centroid(&self) -> Point {
        let n = self.members.len() as f64;
        Point::new(self.sum_x / n, self.sum_y / n)
    }
}

/// Result of [`cluster_endpoints`].
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    centroids: Vec<Point>,
    sizes: Vec<usize>,
    labels: Vec<usize>,
    by_tag: BTreeMap<(usize, Polarity), usize>,
}

impl Clustering {
    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// `true` when no endpoints were clustered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Cluster centroids indexed by cluster id (ids follow closing order).
    #[must_use]
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Number of endpoints absorbed by each cluster.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Cluster id of each input endpoint, in input order.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Cluster id of the endpoint `(line, polarity)`.
    #[must_use]
    pub fn cluster_of(&self, line: usize, polarity: Polarity) -> Option<usize> {
        self.by_tag.get(&(line, polarity)).copied()
    }
}

/// Partitions `endpoints` into clusters under `tolerance`.
///
/// A negative tolerance merges nothing; callers validate it beforehand.
#[instrument(level = "debug", skip(endpoints), fields(endpoints = endpoints.len()))]
pub fn cluster_endpoints(endpoints: &[Endpoint], tolerance: f64) -> Clustering {
    // Pending indices sorted descending by x, so the lowest x sits at the tail.
    let mut pending: Vec<usize> = (0..endpoints.len()).collect();
    pending.sort_by(|&a, &b| endpoints[b].point.x.total_cmp(&endpoints[a].point.x));

    let mut labels = vec![0; endpoints.len()];
    let mut centroids = Vec::new();
    let mut sizes = Vec::new();

    while let Some(seed) = pending.pop() {
        let id = centroids.len();
        let mut cluster = Cluster::open(endpoints[seed].point);
        labels[seed] = id;

        let mut j = pending.len();
        while j > 0 {
            j -= 1;
            let candidate = endpoints[pending[j]].point;
            if cluster.min_x_distance(candidate) > tolerance {
                break;
            }
            if cluster.reaches(candidate, tolerance) {
                cluster.absorb(candidate);
                labels[pending.remove(j)] = id;
            }
        }

        centroids.push(cluster.centroid());
        sizes.push(cluster.members.len());
    }

    let by_tag = endpoints
        .iter()
        .zip(&labels)
        .map(|(e, &id)| ((e.line, e.polarity), id))
        .collect();
    debug!(clusters = centroids.len(), "endpoints clustered");

    Clustering {
        centroids,
        sizes,
        labels,
        by_tag,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{cluster_endpoints, Endpoint, Polarity};
    use hydronet_geom::Point;

    fn tags(points: &[(f64, f64)]) -> Vec<Endpoint> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Endpoint {
                line: i,
                polarity: Polarity::Start,
                point: Point::new(x, y),
            })
            .collect()
    }

    #[test]
    fn merges_within_tolerance_and_averages() {
        let c = cluster_endpoints(&tags(&[(0.0, 0.0), (5.0, 5.0), (0.1, 0.0)]), 0.2);
        assert_eq!(c.len(), 2);
        assert_eq!(c.labels(), &[0, 1, 0]);
        assert_eq!(c.sizes(), &[2, 1]);
        assert!((c.centroids()[0].x - 0.05).abs() < 1e-12);
        assert_eq!(c.cluster_of(2, Polarity::Start), Some(0));
        assert_eq!(c.cluster_of(2, Polarity::End), None);
    }

    #[test]
    fn zero_tolerance_groups_exact_duplicates() {
        let c = cluster_endpoints(&tags(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0 + 1e-9)]), 0.0);
        assert_eq!(c.len(), 2);
        assert_eq!(c.labels()[0], c.labels()[1]);
        assert_ne!(c.labels()[0], c.labels()[2]);
    }

    #[test]
    fn chains_through_intermediate_members() {
        // 0 and 2 are 2.0 apart but both within 1.0 of 1.
        let c = cluster_endpoints(&tags(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)]), 1.0);
        assert_eq!(c.len(), 1);
        assert!((c.centroids()[0].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn same_x_far_y_stays_apart() {
        let c = cluster_endpoints(&tags(&[(0.0, 0.0), (0.0, 10.0)]), 0.5);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(cluster_endpoints(&[], 1.0).is_empty());
    }
}
