// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use hydronet_geom::GeometryError;
use thiserror::Error;

/// Errors raised while reading section text or mapping it to a network.
///
/// Row positions are 1-based within their section.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InpError {
    /// Content before the first `[SECTION]` header.
    #[error("line {line}: content outside any section")]
    OrphanLine {
        /// 1-based line number in the input text.
        line: usize,
    },
    /// A row has fewer fields than its section requires.
    #[error("[{section}] row {row}: missing field {field}")]
    MissingField {
        /// Section name.
        section: String,
        /// Row within the section.
        row: usize,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A numeric field does not parse.
    #[error("[{section}] row {row}: invalid number {value:?}")]
    BadNumber {
        /// Section name.
        section: String,
        /// Row within the section.
        row: usize,
        /// Offending text.
        value: String,
    },
    /// A valve type is not recognised.
    #[error("[{section}] row {row}: unknown kind {value:?}")]
    UnknownKind {
        /// Section name.
        section: String,
        /// Row within the section.
        row: usize,
        /// Offending text.
        value: String,
    },
    /// A node has no `[COORDINATES]` row.
    #[error("node {0} has no coordinates")]
    MissingCoordinates(String),
    /// A link names a node that is not defined.
    #[error("link {link} references unknown node {node}")]
    UnknownNode {
        /// Link id.
        link: String,
        /// Missing node id.
        node: String,
    },
    /// A `[VERTICES]` row names a link that is not defined.
    #[error("vertex row references unknown link {0}")]
    UnknownLink(String),
    /// Coordinates failed geometry validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
