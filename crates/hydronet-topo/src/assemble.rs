// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw lines → node/link network.

use hydronet_geom::{check_tolerance, GeometryError, LineString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cluster::{cluster_endpoints, Endpoint, Polarity};
use crate::network::{Link, Network, Node};
use crate::numbering::IdPolicy;

/// Default endpoint merge tolerance, in map units.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Tolerance and numbering used by [`assemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    /// Endpoint merge distance.
    pub tolerance: f64,
    /// Node id policy, indexed by cluster id.
    pub nodes: IdPolicy,
    /// Link id policy, indexed by input line position.
    pub links: IdPolicy,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            nodes: IdPolicy::default_nodes(),
            links: IdPolicy::default_links(),
        }
    }
}

/// Builds a network from free-form lines.
///
/// Line endpoints within `options.tolerance` are merged into one node at the
/// cluster centroid; each link's end vertices are snapped onto its nodes and
/// its length recomputed. Links keep input order.
///
/// # Errors
/// - [`GeometryError::InvalidTolerance`] for a negative or non-finite tolerance.
/// - [`GeometryError::ZeroLength`] for a line of zero length.
/// - [`GeometryError::Looped`] for a line whose ends lie within the tolerance.
/// - [`GeometryError::Collapsed`] for a line whose ends are farther apart but
///   still land in one cluster through chain merging.
#[instrument(level = "debug", skip_all, fields(lines = lines.len(), tolerance = options.tolerance))]
pub fn assemble(lines: &[LineString], options: &AssembleOptions) -> Result<Network, GeometryError> {
    let tolerance = check_tolerance(options.tolerance)?;
    for (i, line) in lines.iter().enumerate() {
        if line.length() <= 0.0 {
            return Err(GeometryError::ZeroLength { line: i });
        }
        if line.first().distance(line.last()) <= tolerance {
            return Err(GeometryError::Looped { line: i });
        }
    }

    let endpoints: Vec<Endpoint> = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| Endpoint::of_line(i, line))
        .collect();
    let clustering = cluster_endpoints(&endpoints, tolerance);

    let nodes: Vec<Node> = clustering
        .centroids()
        .iter()
        .enumerate()
        .map(|(k, &c)| Node::new(options.nodes.format(k), c))
        .collect();

    let mut links = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        // Every line contributed both endpoints above.
        let s = clustering.cluster_of(i, Polarity::Start).unwrap_or_default();
        let e = clustering.cluster_of(i, Polarity::End).unwrap_or_default();
        if s == e {
            return Err(GeometryError::Collapsed { line: i });
        }
        let id = options.links.format(i);
        let geometry = line.clone().with_endpoints(nodes[s].point, nodes[e].point);
        links.push(Link::new(id, nodes[s].id.clone(), nodes[e].id.clone(), geometry));
    }

    debug!(nodes = nodes.len(), links = links.len(), "network assembled");
    Ok(Network { nodes, links })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{assemble, AssembleOptions};
    use hydronet_geom::{GeometryError, LineString, Point};

    fn line(pts: &[(f64, f64)]) -> LineString {
        LineString::new(pts.iter().copied().map(Point::from).collect()).unwrap()
    }

    #[test]
    fn rejects_bad_input() {
        let opts = AssembleOptions::default();
        assert_eq!(
            assemble(&[line(&[(0.0, 0.0), (1.0, 0.0)]), line(&[(2.0, 2.0), (2.0, 2.0)])], &opts),
            Err(GeometryError::ZeroLength { line: 1 })
        );
        assert_eq!(
            assemble(&[line(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0005)])], &opts),
            Err(GeometryError::Looped { line: 0 })
        );
        let bad = AssembleOptions {
            tolerance: -1.0,
            ..AssembleOptions::default()
        };
        assert!(matches!(
            assemble(&[], &bad),
            Err(GeometryError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn chain_merged_ends_are_rejected() {
        // Line 1's start sits within 1.0 of both ends of line 0.
        let opts = AssembleOptions {
            tolerance: 1.0,
            ..AssembleOptions::default()
        };
        assert_eq!(
            assemble(
                &[line(&[(0.0, 0.0), (1.5, 0.0)]), line(&[(0.75, 0.5), (0.75, 10.0)])],
                &opts
            ),
            Err(GeometryError::Collapsed { line: 0 })
        );
    }

    #[test]
    fn snaps_link_ends_to_centroids() {
        let opts = AssembleOptions {
            tolerance: 0.1,
            ..AssembleOptions::default()
        };
        let net = assemble(
            &[
                line(&[(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]),
                line(&[(10.0, 0.02), (20.0, 0.0)]),
            ],
            &opts,
        )
        .unwrap();
        assert_eq!(net.nodes.len(), 3);
        let shared = net.node(&net.links[0].end).unwrap();
        assert!((shared.point.y - 0.01).abs() < 1e-12);
        assert_eq!(net.links[1].start, shared.id);
        assert_eq!(net.links[0].geometry.last(), shared.point);
        assert_eq!(net.links[1].geometry.first(), shared.point);
        assert_eq!(net.links[0].geometry.interior(), &[Point::new(5.0, 1.0)]);
        assert_eq!(net.links[0].id, "L-1000");
        assert_eq!(net.links[1].id, "L-1001");
        assert!((net.links[1].length - net.links[1].geometry.length()).abs() < 1e-12);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let o: AssembleOptions = serde_json::from_str(r#"{"tolerance":0.5}"#).unwrap();
        assert!((o.tolerance - 0.5).abs() < f64::EPSILON);
        assert_eq!(o.nodes.format(0), "N-1000");
    }
}
