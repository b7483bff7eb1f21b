// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! LandXML input for hydronet.
//!
//! - [`tin_from_landxml`]: a named (or the first) TIN surface as a
//!   [`hydronet_geom::Tin`], ready for [`hydronet_topo::assign_elevations`].
//! - [`networks_from_landxml`]: gravity pipe networks as
//!   [`hydronet_topo::Network`]s plus their structure and pipe tables.
//!
//! Elements are matched by local name, so LandXML 1.0 to 1.2 documents read
//! the same. LandXML writes coordinates northing first; both readers swap
//! them into `(x, y)` = `(easting, northing)`.
#![forbid(unsafe_code)]

mod error;
mod pipes;
mod surface;
mod xml;

pub use error::LandXmlError;
pub use pipes::{
    networks_from_landxml, Crs, CrossSection, LandXmlNetworks, PipeNetwork, PipeRecord, Structure,
};
pub use surface::tin_from_landxml;
