// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Referential-integrity checks over node/link lists.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ConsistencyError;
use crate::network::{Link, Node};

/// Integrity problems found by [`validate`], as sets of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    /// Node ids no link starts or ends at.
    pub orphan_nodes: BTreeSet<String>,
    /// Node ids that occur more than once.
    pub duplicate_nodes: BTreeSet<String>,
    /// Link ids whose start or end node is missing.
    pub undefined_endpoints: BTreeSet<String>,
    /// Link ids that occur more than once.
    pub duplicate_links: BTreeSet<String>,
    /// Link ids whose start and end node coincide.
    pub loops: BTreeSet<String>,
}

impl ProblemReport {
    /// `true` when every problem set is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.problem_count() == 0
    }

    /// Total number of reported ids.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.orphan_nodes.len()
            + self.duplicate_nodes.len()
            + self.undefined_endpoints.len()
            + self.duplicate_links.len()
            + self.loops.len()
    }

    /// `(category, ids)` pairs in a fixed order, for display.
    pub fn categories(&self) -> [(&'static str, &BTreeSet<String>); 5] {
        [
            ("orphan nodes", &self.orphan_nodes),
            ("duplicate nodes", &self.duplicate_nodes),
            ("undefined endpoints", &self.undefined_endpoints),
            ("duplicate links", &self.duplicate_links),
            ("loops", &self.loops),
        ]
    }
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    ids.filter(|id| !seen.insert(*id))
        .map(str::to_owned)
        .collect()
}

/// Checks `nodes` and `links` for dangling, duplicate and looped references.
///
/// Never fails; an empty report means the network is consistent.
pub fn validate(nodes: &[Node], links: &[Link]) -> ProblemReport {
    let known: BTreeSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let referenced: BTreeSet<&str> = links
        .iter()
        .flat_map(|l| [l.start.as_str(), l.end.as_str()])
        .collect();

    ProblemReport {
        orphan_nodes: known
            .difference(&referenced)
            .map(|id| (*id).to_owned())
            .collect(),
        duplicate_nodes: duplicates(nodes.iter().map(|n| n.id.as_str())),
        undefined_endpoints: links
            .iter()
            .filter(|l| !known.contains(l.start.as_str()) || !known.contains(l.end.as_str()))
            .map(|l| l.id.clone())
            .collect(),
        duplicate_links: duplicates(links.iter().map(|l| l.id.as_str())),
        loops: links
            .iter()
            .filter(|l| l.start == l.end)
            .map(|l| l.id.clone())
            .collect(),
    }
}

/// Number of link ends at each node, including isolated nodes at zero.
///
/// # Errors
/// [`ConsistencyError::UnknownNode`] if a link references a missing node.
pub fn degrees(nodes: &[Node], links: &[Link]) -> Result<BTreeMap<String, usize>, ConsistencyError> {
    let mut degree: BTreeMap<String, usize> = nodes.iter().map(|n| (n.id.clone(), 0)).collect();
    for link in links {
        for end in [&link.start, &link.end] {
            let Some(d) = degree.get_mut(end) else {
                return Err(ConsistencyError::UnknownNode {
                    link: link.id.clone(),
                    node: end.clone(),
                });
            };
            *d += 1;
        }
    }
    Ok(degree)
}
