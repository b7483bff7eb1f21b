// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use hydronet_geom::GeometryError;
use thiserror::Error;

/// Errors raised while reading a LandXML document.
///
/// `element` fields name the offending element with its `name` or `id`
/// attribute when it has one, e.g. `Struct S1`.
#[derive(Debug, Error)]
pub enum LandXmlError {
    /// The text is not well-formed XML.
    #[error("xml: {0}")]
    Xml(#[from] roxmltree::Error),
    /// No surface with a TIN definition matched.
    #[error("no TIN surface {wanted} (found: {available:?})")]
    SurfaceNotFound {
        /// Requested surface, or `"in document"` when any would do.
        wanted: String,
        /// Names of the TIN surfaces present.
        available: Vec<String>,
    },
    /// A required attribute is absent.
    #[error("<{element}> is missing attribute {attribute}")]
    MissingAttribute {
        /// Offending element.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },
    /// A required child element is absent.
    #[error("<{element}> has no <{child}>")]
    MissingElement {
        /// Offending element.
        element: String,
        /// Missing child's local name.
        child: &'static str,
    },
    /// A numeric attribute or text value does not parse.
    #[error("<{element}>: invalid number {value:?}")]
    BadNumber {
        /// Offending element.
        element: String,
        /// Offending text.
        value: String,
    },
    /// Element text has the wrong number of values.
    #[error("<{element}>: expected {expected} values, found {found}")]
    WrongArity {
        /// Offending element.
        element: String,
        /// Values required.
        expected: usize,
        /// Values present.
        found: usize,
    },
    /// A face names a point id that is not defined.
    #[error("face {face} references unknown point {point}")]
    UnknownPoint {
        /// 1-based face position.
        face: usize,
        /// Missing point id.
        point: String,
    },
    /// A pipe names a structure that is not defined.
    #[error("pipe {pipe} references unknown structure {structure}")]
    UnknownStructure {
        /// Pipe name.
        pipe: String,
        /// Missing structure name.
        structure: String,
    },
    /// Pressure networks use a different element set.
    #[error("pipe network {name}: {kind} networks are not supported")]
    UnsupportedNetwork {
        /// Network name.
        name: String,
        /// `pipeNetType` value.
        kind: String,
    },
    /// Coordinates failed geometry validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
