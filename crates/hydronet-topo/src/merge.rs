// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::network::Network;

/// Largest coordinate disagreement between two nodes sharing an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOffset {
    /// Shared node id.
    pub id: String,
    /// Distance between the two coordinates.
    pub distance: f64,
}

/// Result of [`merge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Combined network.
    pub network: Network,
    /// Number of secondary nodes whose id already existed in the primary.
    pub shared_nodes: usize,
    /// Largest offset among shared nodes; `None` when nothing was shared.
    pub max_offset: Option<NodeOffset>,
}

/// Combines two networks.
///
/// Keeps every primary node, then the secondary nodes with new ids; shared
/// ids keep the primary coordinate. Links of both networks are kept, primary
/// first, and may need [`crate::validate()`] afterwards.
#[instrument(level = "debug", skip_all)]
pub fn merge(primary: &Network, secondary: &Network) -> MergeReport {
    let known: BTreeMap<&str, usize> = primary
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut network = primary.clone();
    let mut shared_nodes = 0;
    let mut max_offset: Option<NodeOffset> = None;
    for node in &secondary.nodes {
        match known.get(node.id.as_str()) {
            Some(&i) => {
                shared_nodes += 1;
                let distance = primary.nodes[i].point.distance(node.point);
                if max_offset.as_ref().is_none_or(|m| distance > m.distance) {
                    max_offset = Some(NodeOffset {
                        id: node.id.clone(),
                        distance,
                    });
                }
            }
            None => network.nodes.push(node.clone()),
        }
    }
    network.links.extend(secondary.links.iter().cloned());

    if let Some(m) = max_offset.as_ref().filter(|m| m.distance > 0.0) {
        warn!(node = %m.id, distance = m.distance, shared_nodes, "shared node ids disagree on position");
    }
    MergeReport {
        network,
        shared_nodes,
        max_offset,
    }
}
