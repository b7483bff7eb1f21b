// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `<PipeNetwork>` gravity networks: structures become nodes, pipes links.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use hydronet_geom::{LineString, Point};
use hydronet_topo::{Link, Network, Node, NodeKind};
use roxmltree::{Document, Node as XmlNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::LandXmlError;
use crate::xml::{attr, child, children, is, number, numbers, opt_number};

/// Description some exporters give placeholder structures.
const NULL_STRUCTURE: &str = "Dummy Null Structure for LandXML purposes";

/// Coordinate reference declared by `<CoordinateSystem>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crs {
    /// `epsgCode` attribute.
    Epsg(String),
    /// `ogcWktCode` attribute.
    Wkt(String),
}

/// Levels of a structure (manhole, inlet, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Top (ground) level.
    pub rim: f64,
    /// Bottom level.
    pub sump: f64,
    /// Rim minus sump.
    pub depth: f64,
}

/// Pipe cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum CrossSection {
    /// `<CircPipe diameter="..">`.
    Circular {
        /// Diameter.
        diameter: f64,
    },
    /// `<RectPipe width=".." height="..">`.
    Rectangular {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
}

/// Hydraulic data of one pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeRecord {
    /// Invert level at the start structure, when given.
    pub start_invert: Option<f64>,
    /// Invert level at the end structure, when given.
    pub end_invert: Option<f64>,
    /// Slope as written in the file.
    pub slope: Option<f64>,
    /// Cross-section, when given.
    pub section: Option<CrossSection>,
}

/// One `<PipeNetwork>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeNetwork {
    /// `name` attribute.
    pub name: String,
    /// `pipeNetType` attribute (`storm`, `sanitary`, ...).
    pub kind: String,
    /// Structures as nodes (elevation = sump) and pipes as straight links.
    pub network: Network,
    /// Structure levels keyed by node id.
    pub structures: BTreeMap<String, Structure>,
    /// Pipe data keyed by link id.
    pub pipes: BTreeMap<String, PipeRecord>,
}

/// Every gravity network of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandXmlNetworks {
    /// Declared coordinate system, if any.
    pub crs: Option<Crs>,
    /// Networks in document order.
    pub networks: Vec<PipeNetwork>,
}

fn crs_of(doc: &Document<'_>) -> Option<Crs> {
    let cs = doc.descendants().find(|n| is(n, "CoordinateSystem"))?;
    cs.attribute("epsgCode")
        .map(|c| Crs::Epsg(c.to_owned()))
        .or_else(|| cs.attribute("ogcWktCode").map(|c| Crs::Wkt(c.to_owned())))
}

/// Reads every `<PipeNetwork>` in `text`.
///
/// Structures described as LandXML null placeholders are skipped together
/// with the pipes that touch them. Link length is the `length` attribute
/// when present, else the planar distance between the structures.
///
/// # Errors
/// [`LandXmlError::UnsupportedNetwork`] for `water` (pressure) networks,
/// [`LandXmlError::UnknownStructure`] for pipes naming an undefined
/// structure, and the attribute and number errors of malformed elements.
#[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn networks_from_landxml(text: &str) -> Result<LandXmlNetworks, LandXmlError> {
    let doc = Document::parse(text)?;
    let networks = doc
        .descendants()
        .filter(|n| is(n, "PipeNetwork"))
        .map(read_network)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LandXmlNetworks {
        crs: crs_of(&doc),
        networks,
    })
}

fn read_network(xml: XmlNode<'_, '_>) -> Result<PipeNetwork, LandXmlError> {
    let name = attr(&xml, "name")?.to_owned();
    let kind = attr(&xml, "pipeNetType")?.to_owned();
    if kind == "water" {
        return Err(LandXmlError::UnsupportedNetwork { name, kind });
    }

    let mut nodes = Vec::new();
    let mut structures = BTreeMap::new();
    let mut placeholders = BTreeSet::new();
    // (pipe, structure) -> invert level
    let mut inverts: HashMap<(&str, &str), f64> = HashMap::new();
    for s in child(xml, "Structs").into_iter().flat_map(|n| children(n, "Struct")) {
        let id = attr(&s, "name")?;
        if s.attribute("desc") == Some(NULL_STRUCTURE) {
            placeholders.insert(id);
            continue;
        }
        let rim = number(&s, "elevRim")?;
        let sump = number(&s, "elevSump")?;
        let level = Structure {
            rim,
            sump,
            depth: rim - sump,
        };
        let Some(center) = child(s, "Center") else {
            return Err(LandXmlError::MissingElement {
                element: format!("Struct {id}"),
                child: "Center",
            });
        };
        let [northing, easting] = numbers::<2>(&center)?;
        for invert in children(s, "Invert") {
            inverts.insert((attr(&invert, "refPipe")?, id), number(&invert, "elev")?);
        }
        let mut node = Node::new(id, Point::new(easting, northing));
        node.kind = Some(NodeKind::Junction);
        node.elevation = Some(level.sump);
        nodes.push(node);
        structures.insert(id.to_owned(), level);
    }

    let positions: HashMap<&str, Point> = nodes.iter().map(|n| (n.id.as_str(), n.point)).collect();
    let mut links = Vec::new();
    let mut pipes = BTreeMap::new();
    for p in child(xml, "Pipes").into_iter().flat_map(|n| children(n, "Pipe")) {
        let id = attr(&p, "name")?;
        let start = attr(&p, "refStart")?;
        let end = attr(&p, "refEnd")?;
        if placeholders.contains(start) || placeholders.contains(end) {
            warn!(pipe = id, "pipe touches a placeholder structure; skipped");
            continue;
        }
        let position = |structure: &str| {
            positions
                .get(structure)
                .copied()
                .ok_or_else(|| LandXmlError::UnknownStructure {
                    pipe: id.to_owned(),
                    structure: structure.to_owned(),
                })
        };
        let geometry = LineString::new(vec![position(start)?, position(end)?])?;
        let mut link = Link::new(id, start, end, geometry);
        if let Some(length) = opt_number(&p, "length")? {
            link.length = length;
        }
        links.push(link);

        let section = if let Some(c) = child(p, "CircPipe") {
            Some(CrossSection::Circular {
                diameter: number(&c, "diameter")?,
            })
        } else if let Some(r) = child(p, "RectPipe") {
            Some(CrossSection::Rectangular {
                width: number(&r, "width")?,
                height: number(&r, "height")?,
            })
        } else {
            None
        };
        pipes.insert(
            id.to_owned(),
            PipeRecord {
                start_invert: inverts.get(&(id, start)).copied(),
                end_invert: inverts.get(&(id, end)).copied(),
                slope: opt_number(&p, "slope")?,
                section,
            },
        );
    }

    debug!(
        network = %name,
        nodes = nodes.len(),
        links = links.len(),
        placeholders = placeholders.len(),
        "pipe network read"
    );
    Ok(PipeNetwork {
        name,
        kind,
        network: Network { nodes, links },
        structures,
        pipes,
    })
}
