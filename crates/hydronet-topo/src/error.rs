// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// References that do not resolve in a caller-built network or graph.
///
/// Networks produced by [`crate::assemble()`] never trigger these. They arise
/// from hand-edited or merged data; [`crate::validate()`] reports the same
/// conditions as data instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// An edge label was added twice to a graph.
    #[error("duplicate edge label: {0}")]
    DuplicateEdge(String),
    /// A link names a node id that is not in the node list.
    #[error("link {link} references unknown node {node}")]
    UnknownNode {
        /// Offending link id.
        link: String,
        /// Missing node id.
        node: String,
    },
}
