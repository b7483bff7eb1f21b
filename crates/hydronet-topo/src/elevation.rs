// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node elevations from a triangulated surface.

use hydronet_geom::Tin;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::network::Network;

/// Outcome of [`assign_elevations`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElevationReport {
    /// Nodes that received a surface elevation.
    pub assigned: usize,
    /// Ids of nodes outside the surface, in node order.
    pub outside: Vec<String>,
}

/// Sets every node's elevation from `surface`.
///
/// Nodes outside every face keep whatever elevation they had and are listed
/// in the report.
#[instrument(level = "debug", skip_all, fields(nodes = network.nodes.len(), faces = surface.len()))]
pub fn assign_elevations(network: &mut Network, surface: &Tin) -> ElevationReport {
    let mut report = ElevationReport::default();
    for node in &mut network.nodes {
        match surface.elevation(node.point) {
            Some(z) => {
                node.elevation = Some(z);
                report.assigned += 1;
            }
            None => report.outside.push(node.id.clone()),
        }
    }
    if !report.outside.is_empty() {
        warn!(outside = report.outside.len(), "nodes outside the surface");
    }
    debug!(assigned = report.assigned, "elevations assigned");
    report
}
