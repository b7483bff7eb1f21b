// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mapping between network sections and [`Network`] aggregates.
//!
//! Only topology, coordinates, kinds, elevations and the pipe table travel;
//! other sections of a template pass through untouched.

use std::collections::BTreeMap;

use hydronet_geom::{LineString, Point};
use hydronet_topo::{Link, LinkKind, Network, Node, NodeKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::InpError;
use crate::sections::{fields, join_fields, Sections};

/// Line appended to `[TITLE]` on export.
pub const GENERATOR_NOTE: &str = "; generated by hydronet";

/// Relative margin added around the network when sizing `[BACKDROP]`.
pub const BACKDROP_MARGIN: f64 = 0.1;

/// Section order used when a template lacks them.
const NETWORK_SECTIONS: [&str; 10] = [
    "TITLE",
    "JUNCTIONS",
    "RESERVOIRS",
    "TANKS",
    "PIPES",
    "PUMPS",
    "VALVES",
    "COORDINATES",
    "VERTICES",
    "BACKDROP",
];

/// Hydraulic attributes of a pipe, kept beside the network.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipeAttributes {
    /// Internal diameter.
    pub diameter: f64,
    /// Roughness coefficient.
    pub roughness: f64,
    /// Minor loss coefficient, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_loss: Option<f64>,
}

/// Pipe attributes keyed by link id.
pub type PipeTable = BTreeMap<String, PipeAttributes>;

/// A network read from section text plus its pipe side table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InpModel {
    /// Nodes and links.
    pub network: Network,
    /// Pipe attributes.
    pub pipes: PipeTable,
}

/// Field cursor over one row, carrying its position for errors.
struct Row<'a> {
    section: &'static str,
    row: usize,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    fn new(section: &'static str, row: usize, line: &'a str) -> Self {
        Self {
            section,
            row: row + 1,
            fields: fields(line),
        }
    }

    fn text(&self, i: usize, field: &'static str) -> Result<&'a str, InpError> {
        self.fields
            .get(i)
            .copied()
            .ok_or_else(|| InpError::MissingField {
                section: self.section.to_owned(),
                row: self.row,
                field,
            })
    }

    fn number(&self, i: usize, field: &'static str) -> Result<f64, InpError> {
        let text = self.text(i, field)?;
        self.parse_number(text)
    }

    fn optional_number(&self, i: usize) -> Result<Option<f64>, InpError> {
        match self.fields.get(i) {
            Some(text) if !is_status(text) => self.parse_number(text).map(Some),
            _ => Ok(None),
        }
    }

    fn parse_number(&self, text: &str) -> Result<f64, InpError> {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InpError::BadNumber {
                section: self.section.to_owned(),
                row: self.row,
                value: text.to_owned(),
            })
    }

    fn last(&self) -> Option<&'a str> {
        self.fields.last().copied()
    }
}

fn is_status(text: &str) -> bool {
    ["OPEN", "CLOSED", "CV"]
        .iter()
        .any(|s| text.eq_ignore_ascii_case(s))
}

/// Reads nodes, links and pipe attributes from `sections`.
///
/// Link geometry runs from the start node coordinate through the
/// `[VERTICES]` rows (file order) to the end node coordinate. Pipes keep the
/// length written in the file; pumps and valves use their planar length.
///
/// # Errors
/// Any [`InpError`] other than [`InpError::OrphanLine`].
#[instrument(level = "debug", skip_all)]
pub fn network_from_sections(sections: &Sections) -> Result<InpModel, InpError> {
    debug!(sections = ?sections.names().collect::<Vec<_>>(), "reading network");
    let mut coordinates: BTreeMap<&str, Point> = BTreeMap::new();
    for (i, line) in sections.lines("COORDINATES").iter().enumerate() {
        let row = Row::new("COORDINATES", i, line);
        let id = row.text(0, "id")?;
        coordinates.insert(id, Point::new(row.number(1, "x")?, row.number(2, "y")?));
    }

    let mut nodes = Vec::new();
    for (name, kind) in [
        ("JUNCTIONS", NodeKind::Junction),
        ("RESERVOIRS", NodeKind::Reservoir),
        ("TANKS", NodeKind::Tank),
    ] {
        for (i, line) in sections.lines(name).iter().enumerate() {
            let row = Row::new(name, i, line);
            let id = row.text(0, "id")?;
            let point = *coordinates
                .get(id)
                .ok_or_else(|| InpError::MissingCoordinates(id.to_owned()))?;
            let mut node = Node::new(id, point);
            node.kind = Some(kind);
            node.elevation = Some(row.number(1, "elevation")?);
            nodes.push(node);
        }
    }
    let node_points: BTreeMap<&str, Point> =
        nodes.iter().map(|n| (n.id.as_str(), n.point)).collect();

    let mut pending: Vec<PendingLink> = Vec::new();
    let mut pipes = PipeTable::new();
    for (i, line) in sections.lines("PIPES").iter().enumerate() {
        let row = Row::new("PIPES", i, line);
        let mut link = PendingLink::from_row(&row)?;
        link.length = Some(row.number(3, "length")?);
        pipes.insert(
            link.id.clone(),
            PipeAttributes {
                diameter: row.number(4, "diameter")?,
                roughness: row.number(5, "roughness")?,
                minor_loss: row.optional_number(6)?,
            },
        );
        if row.fields.len() > 6 && row.last().is_some_and(|s| s.eq_ignore_ascii_case("CV")) {
            link.kind = LinkKind::CvPipe;
        }
        pending.push(link);
    }
    for (i, line) in sections.lines("PUMPS").iter().enumerate() {
        let row = Row::new("PUMPS", i, line);
        let mut link = PendingLink::from_row(&row)?;
        link.kind = LinkKind::Pump;
        pending.push(link);
    }
    for (i, line) in sections.lines("VALVES").iter().enumerate() {
        let row = Row::new("VALVES", i, line);
        let mut link = PendingLink::from_row(&row)?;
        let value = row.text(4, "type")?;
        link.kind = value
            .parse::<LinkKind>()
            .ok()
            .filter(|k| k.is_valve())
            .ok_or_else(|| InpError::UnknownKind {
                section: "VALVES".to_owned(),
                row: row.row,
                value: value.to_owned(),
            })?;
        pending.push(link);
    }

    for (i, line) in sections.lines("VERTICES").iter().enumerate() {
        let row = Row::new("VERTICES", i, line);
        let id = row.text(0, "link")?;
        let vertex = Point::new(row.number(1, "x")?, row.number(2, "y")?);
        let link = pending
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| InpError::UnknownLink(id.to_owned()))?;
        link.vertices.push(vertex);
    }

    let links = pending
        .into_iter()
        .map(|l| l.resolve(&node_points))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(nodes = nodes.len(), links = links.len(), pipes = pipes.len(), "network read");
    Ok(InpModel {
        network: Network { nodes, links },
        pipes,
    })
}

/// A link row before its end coordinates are known.
struct PendingLink {
    id: String,
    start: String,
    end: String,
    kind: LinkKind,
    length: Option<f64>,
    vertices: Vec<Point>,
}

impl PendingLink {
    fn from_row(row: &Row<'_>) -> Result<Self, InpError> {
        Ok(Self {
            id: row.text(0, "id")?.to_owned(),
            start: row.text(1, "start node")?.to_owned(),
            end: row.text(2, "end node")?.to_owned(),
            kind: LinkKind::Pipe,
            length: None,
            vertices: Vec::new(),
        })
    }

    fn resolve(self, nodes: &BTreeMap<&str, Point>) -> Result<Link, InpError> {
        let lookup = |node: &str| {
            nodes
                .get(node)
                .copied()
                .ok_or_else(|| InpError::UnknownNode {
                    link: self.id.clone(),
                    node: node.to_owned(),
                })
        };
        let (a, b) = (lookup(&self.start)?, lookup(&self.end)?);

        let mut vertices = Vec::with_capacity(self.vertices.len() + 2);
        vertices.push(a);
        vertices.extend_from_slice(&self.vertices);
        vertices.push(b);
        let geometry = LineString::new(vertices)?;

        let mut link = Link::new(self.id, self.start, self.end, geometry);
        if let Some(length) = self.length {
            link.length = length;
        }
        link.kind = Some(self.kind);
        Ok(link)
    }
}

/// Writes `network` into `template`, creating missing sections.
///
/// Untyped nodes are written as junctions and untyped links as pipes. Pipe
/// rows take diameter, roughness and minor loss from `pipes` (zero when
/// absent). `DIMENSIONS` in `[BACKDROP]` is set to the network bounds plus a
/// [`BACKDROP_MARGIN`] on each side, and [`GENERATOR_NOTE`] is appended to
/// `[TITLE]`.
#[instrument(level = "debug", skip_all, fields(nodes = network.nodes.len(), links = network.links.len()))]
pub fn sections_from_network(network: &Network, pipes: &PipeTable, template: Sections) -> Sections {
    let mut out = template;
    for name in NETWORK_SECTIONS {
        out.section_mut(name);
    }

    for node in &network.nodes {
        let elevation = node.elevation.unwrap_or(0.0);
        let (section, row) = match node.kind.unwrap_or(NodeKind::Junction) {
            NodeKind::Junction => ("JUNCTIONS", join_fields([node.id.clone(), fmt(elevation), fmt(0.0)])),
            NodeKind::Reservoir => ("RESERVOIRS", join_fields([node.id.clone(), fmt(elevation)])),
            NodeKind::Tank => {
                let mut row = vec![node.id.clone(), fmt(elevation)];
                row.extend(std::iter::repeat_n(fmt(0.0), 5));
                ("TANKS", join_fields(row))
            }
        };
        out.section_mut(section).push(row);
        out.section_mut("COORDINATES")
            .push(join_fields([node.id.clone(), fmt(node.point.x), fmt(node.point.y)]));
    }

    for link in &network.links {
        let ends = [link.id.clone(), link.start.clone(), link.end.clone()];
        let kind = link.kind.unwrap_or(LinkKind::Pipe);
        let (section, row) = match kind {
            LinkKind::Pipe | LinkKind::CvPipe => {
                let attrs = pipes.get(&link.id).copied().unwrap_or_default();
                let status = if kind == LinkKind::CvPipe { "CV" } else { "Open" };
                let mut row = ends.to_vec();
                row.extend([
                    fmt(link.length),
                    fmt(attrs.diameter),
                    fmt(attrs.roughness),
                    fmt(attrs.minor_loss.unwrap_or(0.0)),
                    status.to_owned(),
                ]);
                ("PIPES", join_fields(row))
            }
            LinkKind::Pump => ("PUMPS", join_fields(ends)),
            valve => {
                let mut row = ends.to_vec();
                row.extend([fmt(0.0), valve.to_string(), fmt(0.0), fmt(0.0)]);
                ("VALVES", join_fields(row))
            }
        };
        out.section_mut(section).push(row);
        for v in link.geometry.interior() {
            out.section_mut("VERTICES")
                .push(join_fields([link.id.clone(), fmt(v.x), fmt(v.y)]));
        }
    }

    if let Some(bounds) = network.bounds() {
        let b = bounds.expand_relative(BACKDROP_MARGIN);
        let dimensions = join_fields([
            "DIMENSIONS".to_owned(),
            fmt(b.min().x),
            fmt(b.min().y),
            fmt(b.max().x),
            fmt(b.max().y),
        ]);
        let backdrop = out.section_mut("BACKDROP");
        let mut replaced = false;
        for line in backdrop.iter_mut() {
            if fields(line)
                .first()
                .is_some_and(|f| f.eq_ignore_ascii_case("DIMENSIONS"))
            {
                line.clone_from(&dimensions);
                replaced = true;
            }
        }
        if !replaced {
            backdrop.push(dimensions);
        }
    }

    out.section_mut("TITLE").push(GENERATOR_NOTE.to_owned());
    out
}

fn fmt(v: f64) -> String {
    v.to_string()
}
