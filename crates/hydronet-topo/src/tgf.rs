// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::ConsistencyError;
use crate::network::Network;

/// Renders `network` in Trivial Graph Format.
///
/// Nodes are numbered from 0 in list order (a repeated id keeps its first
/// number); edges reference those numbers and carry the link id as label.
///
/// # Errors
/// [`ConsistencyError::UnknownNode`] if a link references a missing node.
pub fn to_tgf(network: &Network) -> Result<String, ConsistencyError> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut out = String::new();
    for (i, node) in network.nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
        let _ = writeln!(out, "{i} {}", node.id);
    }
    out.push_str("#\n");
    for link in &network.links {
        let lookup = |id: &str| {
            index
                .get(id)
                .copied()
                .ok_or_else(|| ConsistencyError::UnknownNode {
                    link: link.id.clone(),
                    node: id.to_owned(),
                })
        };
        let (s, e) = (lookup(&link.start)?, lookup(&link.end)?);
        let _ = writeln!(out, "{s} {e} {}", link.id);
    }
    Ok(out)
}
