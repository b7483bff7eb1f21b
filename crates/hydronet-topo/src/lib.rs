// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hydronet-topo: turns free-form line geometry into a node/link network and
//! analyses it.
//!
//! Pipeline: [`assemble()`] clusters line endpoints into nodes
//! ([`cluster_endpoints`]) and snaps links onto them; [`validate()`] audits
//! any node/link lists; [`split()`] and [`split_lines_at_points`] refine
//! geometry at points; [`Graph::classify`] separates branched from meshed
//! links; [`assign_elevations`] drapes nodes over a surface. Every operation
//! is a synchronous call over borrowed input; only `assign_elevations`
//! mutates it.
#![forbid(unsafe_code)]

mod assemble;
mod classify;
mod cluster;
mod elevation;
mod error;
mod merge;
mod network;
mod numbering;
mod split;
mod tgf;
mod validate;

pub use assemble::{assemble, AssembleOptions, DEFAULT_TOLERANCE};
pub use classify::{Classification, Graph, ZoneKind};
pub use cluster::{cluster_endpoints, Clustering, Endpoint, Polarity};
pub use elevation::{assign_elevations, ElevationReport};
pub use error::ConsistencyError;
pub use merge::{merge, MergeReport, NodeOffset};
pub use network::{Link, LinkKind, Network, Node, NodeKind, ParseKindError};
pub use numbering::IdPolicy;
pub use split::{dedup_points, split, split_lines_at_points, split_many, SplitLine, SplitReport};
pub use tgf::to_tgf;
pub use validate::{degrees, validate, ProblemReport};
