// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! EPANET-style `.inp` support for hydronet.
//!
//! Two layers:
//! - [`Sections`]: a lossless-enough `[SECTION]` text codec (comments are
//!   dropped) with field helpers.
//! - [`network_from_sections`] / [`sections_from_network`]: the mapping
//!   between the network sections and [`hydronet_topo::Network`], with pipe
//!   hydraulics carried in a [`PipeTable`] side table.
//!
//! Section maps are plain values passed per call.
#![forbid(unsafe_code)]

mod error;
mod model;
mod sections;

pub use error::InpError;
pub use model::{
    network_from_sections, sections_from_network, InpModel, PipeAttributes, PipeTable,
    BACKDROP_MARGIN, GENERATOR_NOTE,
};
pub use sections::{fields, join_fields, Section, Sections, FIELD_SEPARATOR};
