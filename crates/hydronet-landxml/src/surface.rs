// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `<Surface>` TIN definitions.

use std::collections::HashMap;

use hydronet_geom::{SurfacePoint, Tin, Triangle};
use roxmltree::{Document, Node};
use tracing::{debug, instrument};

use crate::error::LandXmlError;
use crate::xml::{attr, child, children, is, numbers, words};

fn is_tin(surface: &Node<'_, '_>) -> bool {
    child(*surface, "Definition").is_some_and(|d| d.attribute("surfType") == Some("TIN"))
}

/// Reads the TIN surface called `name`, or the first TIN surface when `name`
/// is `None`.
///
/// Points are `<P id="..">northing easting z</P>`; faces are
/// `<F>id id id</F>`. Faces flagged invisible (`i="1"`) are holes and are
/// left out.
///
/// # Errors
/// [`LandXmlError::SurfaceNotFound`] when no TIN surface matches, and the
/// attribute, number and reference errors of malformed points and faces.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn tin_from_landxml(text: &str, name: Option<&str>) -> Result<Tin, LandXmlError> {
    let doc = Document::parse(text)?;
    let surfaces: Vec<Node<'_, '_>> = doc
        .descendants()
        .filter(|n| is(n, "Surface") && is_tin(n))
        .collect();
    let found = surfaces
        .iter()
        .find(|s| name.is_none_or(|wanted| s.attribute("name") == Some(wanted)));
    let Some(surface) = found else {
        return Err(LandXmlError::SurfaceNotFound {
            wanted: name.map_or_else(|| "in document".to_owned(), |n| format!("named {n:?}")),
            available: surfaces
                .iter()
                .filter_map(|s| s.attribute("name"))
                .map(str::to_owned)
                .collect(),
        });
    };

    let Some(definition) = child(*surface, "Definition") else {
        return Ok(Tin::default());
    };
    let mut points: HashMap<&str, SurfacePoint> = HashMap::new();
    for p in child(definition, "Pnts").into_iter().flat_map(|n| children(n, "P")) {
        let [northing, easting, z] = numbers::<3>(&p)?;
        points.insert(attr(&p, "id")?, SurfacePoint::new(easting, northing, z));
    }

    let mut faces = Vec::new();
    let mut hidden = 0usize;
    for (i, f) in child(definition, "Faces")
        .into_iter()
        .flat_map(|n| children(n, "F"))
        .enumerate()
    {
        if f.attribute("i") == Some("1") {
            hidden += 1;
            continue;
        }
        let ids = words::<3>(&f)?;
        let mut corners = [SurfacePoint::new(0.0, 0.0, 0.0); 3];
        for (slot, id) in corners.iter_mut().zip(ids) {
            *slot = *points.get(id).ok_or_else(|| LandXmlError::UnknownPoint {
                face: i + 1,
                point: id.to_owned(),
            })?;
        }
        let [a, b, c] = corners;
        faces.push(Triangle::new(a, b, c));
    }

    debug!(
        surface = surface.attribute("name").unwrap_or_default(),
        points = points.len(),
        faces = faces.len(),
        hidden,
        "TIN surface read"
    );
    Ok(Tin::new(faces))
}
