// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Branched/meshed decomposition of an undirected edge set.
//!
//! Leaf peeling removes degree-1 nodes until none remain; every peeled edge
//! is branched (tree-like) and every survivor lies on or between cycles and
//! is meshed. Each kind is then split into connected subzones.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ConsistencyError;
use crate::network::Link;

/// Whether an edge belongs to a tree-like or a cycle-bearing part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// Removed by leaf peeling.
    Branched,
    /// Survives leaf peeling.
    Meshed,
}

impl core::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Branched => "branched",
            Self::Meshed => "meshed",
        })
    }
}

/// Kind and subzone of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Branched or meshed.
    pub kind: ZoneKind,
    /// Connected-component id within `kind`, starting at 1.
    pub subzone: usize,
}

/// Undirected multigraph keyed by edge label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<E, N> {
    edges: BTreeMap<E, (N, N)>,
}

impl<E: Ord, N: Ord> Default for Graph<E, N> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }
}

impl Graph<String, String> {
    /// Graph of the link ids and node ids of `links`.
    ///
    /// # Errors
    /// [`ConsistencyError::DuplicateEdge`] if two links share an id.
    pub fn from_links(links: &[Link]) -> Result<Self, ConsistencyError> {
        let mut g = Self::new();
        for l in links {
            g.add_edge(l.id.clone(), l.start.clone(), l.end.clone())?;
        }
        Ok(g)
    }
}

impl<E: Ord + Clone, N: Ord + Clone> Graph<E, N> {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds edge `label` between `start` and `end`.
    ///
    /// # Errors
    /// [`ConsistencyError::DuplicateEdge`] if `label` is already present.
    pub fn add_edge(&mut self, label: E, start: N, end: N) -> Result<(), ConsistencyError>
    where
        E: Display,
    {
        if self.edges.contains_key(&label) {
            return Err(ConsistencyError::DuplicateEdge(label.to_string()));
        }
        self.edges.insert(label, (start, end));
        Ok(())
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct nodes referenced by edges.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Nodes referenced by at least one edge.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<&N> {
        self.edges.values().flat_map(|(s, e)| [s, e]).collect()
    }

    /// Endpoints of edge `label`.
    #[must_use]
    pub fn endpoints(&self, label: &E) -> Option<(&N, &N)> {
        self.edges.get(label).map(|(s, e)| (s, e))
    }

    /// Edge ends per node; a self-loop counts twice.
    #[must_use]
    pub fn degrees(&self) -> BTreeMap<N, usize> {
        let mut degree = BTreeMap::new();
        for (s, e) in self.edges.values() {
            *degree.entry(s.clone()).or_insert(0) += 1;
            *degree.entry(e.clone()).or_insert(0) += 1;
        }
        degree
    }

    /// Labels of the edges touching `node`, ascending.
    #[must_use]
    pub fn incident_edges(&self, node: &N) -> Vec<&E> {
        self.edges
            .iter()
            .filter(|(_, (s, e))| s == node || e == node)
            .map(|(label, _)| label)
            .collect()
    }

    /// Labels of the other edges sharing a node with `label`, ascending.
    #[must_use]
    pub fn contiguous_edges(&self, label: &E) -> Vec<&E> {
        let Some((s, e)) = self.edges.get(label) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter(|(other, (os, oe))| {
                *other != label && (os == s || os == e || oe == s || oe == e)
            })
            .map(|(other, _)| other)
            .collect()
    }

    /// Classifies every edge as branched or meshed and numbers the connected
    /// subzones of each kind from 1, in ascending label order.
    #[instrument(level = "debug", skip_all, fields(edges = self.edges.len()))]
    pub fn classify(&self) -> BTreeMap<E, Classification> {
        let index = Indexed::new(&self.edges);
        let branched = index.peel();
        let kinds: Vec<ZoneKind> = branched
            .iter()
            .map(|&b| if b { ZoneKind::Branched } else { ZoneKind::Meshed })
            .collect();
        let subzones = index.subzones(&kinds);

        let meshed = kinds.iter().filter(|k| **k == ZoneKind::Meshed).count();
        debug!(branched = kinds.len() - meshed, meshed, "edges classified");

        self.edges
            .keys()
            .zip(kinds.iter().zip(subzones))
            .map(|(label, (&kind, subzone))| (label.clone(), Classification { kind, subzone }))
            .collect()
    }
}

/// Dense integer view of a graph: edges in label order, nodes in `N` order.
struct Indexed {
    ends: Vec<(usize, usize)>,
    incident: Vec<Vec<usize>>,
}

impl Indexed {
    fn new<E, N: Ord>(edges: &BTreeMap<E, (N, N)>) -> Self {
        let nodes: BTreeMap<&N, usize> = edges
            .values()
            .flat_map(|(s, e)| [s, e])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect();
        let mut incident = vec![Vec::new(); nodes.len()];
        let ends: Vec<(usize, usize)> = edges
            .values()
            .enumerate()
            .map(|(k, (s, e))| {
                let (s, e) = (nodes[s], nodes[e]);
                incident[s].push(k);
                if e != s {
                    incident[e].push(k);
                }
                (s, e)
            })
            .collect();
        Self { ends, incident }
    }

    /// Leaf peeling; returns the branched flag per edge.
    fn peel(&self) -> Vec<bool> {
        let mut degree = vec![0usize; self.incident.len()];
        for &(s, e) in &self.ends {
            degree[s] += 1;
            degree[e] += 1;
        }
        let mut branched = vec![false; self.ends.len()];
        let mut leaves: Vec<usize> = (0..degree.len()).filter(|&v| degree[v] == 1).collect();

        while let Some(v) = leaves.pop() {
            if degree[v] != 1 {
                continue;
            }
            let Some(&k) = self.incident[v].iter().find(|&&k| !branched[k]) else {
                continue;
            };
            branched[k] = true;
            let (s, e) = self.ends[k];
            let other = if s == v { e } else { s };
            degree[v] -= 1;
            degree[other] = degree[other].saturating_sub(1);
            if degree[other] == 1 {
                leaves.push(other);
            }
        }
        branched
    }

    /// Connected component ids per edge, counted separately for each kind.
    fn subzones(&self, kinds: &[ZoneKind]) -> Vec<usize> {
        let mut zone = vec![0usize; self.ends.len()];
        let mut counters: BTreeMap<ZoneKind, usize> = BTreeMap::new();
        for seed in 0..self.ends.len() {
            if zone[seed] != 0 {
                continue;
            }
            let kind = kinds[seed];
            let counter = counters.entry(kind).or_insert(0);
            *counter += 1;
            let id = *counter;

            zone[seed] = id;
            let mut queue = VecDeque::from([seed]);
            while let Some(k) = queue.pop_front() {
                let (s, e) = self.ends[k];
                for node in [s, e] {
                    for &next in &self.incident[node] {
                        if zone[next] == 0 && kinds[next] == kind {
                            zone[next] = id;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        zone
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{Graph, ZoneKind};
    use crate::error::ConsistencyError;

    fn graph(edges: &[(&str, &str, &str)]) -> Graph<String, String> {
        let mut g = Graph::new();
        for (l, s, e) in edges {
            g.add_edge((*l).to_owned(), (*s).to_owned(), (*e).to_owned())
                .unwrap();
        }
        g
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut g = graph(&[("a", "1", "2")]);
        assert_eq!(
            g.add_edge("a".into(), "2".into(), "3".into()),
            Err(ConsistencyError::DuplicateEdge("a".into()))
        );
    }

    #[test]
    fn self_loop_counts_twice_and_is_meshed() {
        let g = graph(&[("loop", "1", "1"), ("tail", "1", "2")]);
        assert_eq!(g.degrees()["1"], 3);
        let c = g.classify();
        assert_eq!(c["loop"].kind, ZoneKind::Meshed);
        assert_eq!(c["tail"].kind, ZoneKind::Branched);
    }

    #[test]
    fn two_separate_trees_get_two_subzones() {
        let g = graph(&[("a", "1", "2"), ("b", "2", "3"), ("c", "7", "8")]);
        let c = g.classify();
        assert!(c.values().all(|x| x.kind == ZoneKind::Branched));
        assert_eq!(c["a"].subzone, 1);
        assert_eq!(c["b"].subzone, 1);
        assert_eq!(c["c"].subzone, 2);
    }

    #[test]
    fn two_cycles_joined_by_a_bridge() {
        // Bridge edge "m" between two triangles stays meshed: neither end
        // ever becomes a leaf.
        let g = graph(&[
            ("a1", "1", "2"),
            ("a2", "2", "3"),
            ("a3", "3", "1"),
            ("m", "3", "4"),
            ("b1", "4", "5"),
            ("b2", "5", "6"),
            ("b3", "6", "4"),
        ]);
        let c = g.classify();
        assert!(c.values().all(|x| x.kind == ZoneKind::Meshed && x.subzone == 1));
    }

    #[test]
    fn neighbourhood_queries() {
        let g = graph(&[("a", "1", "2"), ("b", "2", "3"), ("c", "3", "4")]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.incident_edges(&"2".to_owned()), vec!["a", "b"]);
        assert_eq!(g.contiguous_edges(&"b".to_owned()), vec!["a", "c"]);
        assert!(g.contiguous_edges(&"zz".to_owned()).is_empty());
    }
}
