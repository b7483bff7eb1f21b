// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node/link aggregates shared by the assembler, validator and exporters.
//! Pure data; domain attributes (demand, diameter, ...) live in caller-owned
//! side tables keyed by id.

use core::fmt;
use core::str::FromStr;

use hydronet_geom::{Bounds, LineString, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hydraulic role of a node, assigned by the caller after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// Demand/consumption point.
    Junction,
    /// Fixed-head source.
    Reservoir,
    /// Storage with variable level.
    Tank,
}

/// Hydraulic role of a link, assigned by the caller after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkKind {
    /// Plain pipe.
    Pipe,
    /// Pipe with a check valve.
    CvPipe,
    /// Pump.
    Pump,
    /// Pressure reducing valve.
    Prv,
    /// Pressure sustaining valve.
    Psv,
    /// Pressure breaker valve.
    Pbv,
    /// Flow control valve.
    Fcv,
    /// Throttle control valve.
    Tcv,
    /// General purpose valve.
    Gpv,
}

impl LinkKind {
    /// Returns `true` for the valve kinds.
    #[must_use]
    pub fn is_valve(self) -> bool {
        matches!(
            self,
            Self::Prv | Self::Psv | Self::Pbv | Self::Fcv | Self::Tcv | Self::Gpv
        )
    }
}

/// Unrecognized node or link kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for NodeKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JUNCTION" => Ok(Self::Junction),
            "RESERVOIR" => Ok(Self::Reservoir),
            "TANK" => Ok(Self::Tank),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Junction => "JUNCTION",
            Self::Reservoir => "RESERVOIR",
            Self::Tank => "TANK",
        })
    }
}

impl FromStr for LinkKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PIPE" => Ok(Self::Pipe),
            "CVPIPE" => Ok(Self::CvPipe),
            "PUMP" => Ok(Self::Pump),
            "PRV" => Ok(Self::Prv),
            "PSV" => Ok(Self::Psv),
            "PBV" => Ok(Self::Pbv),
            "FCV" => Ok(Self::Fcv),
            "TCV" => Ok(Self::Tcv),
            "GPV" => Ok(Self::Gpv),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pipe => "PIPE",
            Self::CvPipe => "CVPIPE",
            Self::Pump => "PUMP",
            Self::Prv => "PRV",
            Self::Psv => "PSV",
            Self::Pbv => "PBV",
            Self::Fcv => "FCV",
            Self::Tcv => "TCV",
            Self::Gpv => "GPV",
        })
    }
}

/// Topological vertex: a merged cluster of line endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Externally visible id.
    pub id: String,
    /// Cluster centroid.
    pub point: Point,
    /// Hydraulic role, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    /// Elevation, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Node {
    /// Untyped node at `point`.
    #[must_use]
    pub fn new(id: impl Into<String>, point: Point) -> Self {
        Self {
            id: id.into(),
            point,
            kind: None,
            elevation: None,
        }
    }
}

/// Topological edge carrying its line geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Externally visible id.
    pub id: String,
    /// Start node id.
    pub start: String,
    /// End node id.
    pub end: String,
    /// Vertices; the ends coincide with the start/end node coordinates.
    pub geometry: LineString,
    /// Planar length of `geometry` (or a caller-supplied length).
    pub length: f64,
    /// Hydraulic role, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LinkKind>,
}

impl Link {
    /// Untyped link whose length is derived from `geometry`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        geometry: LineString,
    ) -> Self {
        let length = geometry.length();
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            geometry,
            length,
            kind: None,
        }
    }
}

/// Nodes and links of one network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    /// All nodes.
    pub nodes: Vec<Node>,
    /// All links.
    pub links: Vec<Link>,
}

impl Network {
    /// First node with `id`.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First link with `id`.
    #[must_use]
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Bounds of every node and link vertex, `None` for an empty network.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .nodes
            .iter()
            .map(|n| n.point)
            .chain(self.links.iter().flat_map(|l| l.geometry.vertices().iter().copied()));
        let first = points.next()?;
        Some(points.fold(Bounds::new(first, first), |b, p| b.include(p)))
    }
}
