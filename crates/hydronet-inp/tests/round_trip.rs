// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Assembled network → section text → network.

use hydronet_geom::{LineString, Point};
use hydronet_inp::{network_from_sections, sections_from_network, PipeTable, Sections};
use hydronet_topo::{assemble, validate, AssembleOptions, LinkKind, NodeKind};

fn line(pts: &[(f64, f64)]) -> LineString {
    LineString::new(pts.iter().copied().map(Point::from).collect()).unwrap()
}

#[test]
fn ids_topology_and_geometry_survive_text() {
    let mut net = assemble(
        &[
            line(&[(0.0, 0.0), (50.0, 10.0), (100.0, 0.0)]),
            line(&[(100.0, 0.0), (100.0, 100.0)]),
            line(&[(100.0, 100.0), (0.0, 0.0)]),
        ],
        &AssembleOptions::default(),
    )
    .unwrap();
    net.nodes[0].kind = Some(NodeKind::Reservoir);
    net.nodes[0].elevation = Some(75.0);
    net.links[1].kind = Some(LinkKind::Pump);

    let text = sections_from_network(&net, &PipeTable::new(), Sections::new()).render();
    let back = network_from_sections(&Sections::parse(&text).unwrap()).unwrap();
    let got = back.network;

    assert!(validate(&got.nodes, &got.links).is_valid());
    assert_eq!(got.nodes.len(), net.nodes.len());
    for node in &net.nodes {
        let other = got.node(&node.id).unwrap();
        assert_eq!(other.point, node.point);
    }
    assert_eq!(got.node(&net.nodes[0].id).unwrap().kind, Some(NodeKind::Reservoir));
    assert_eq!(got.node(&net.nodes[1].id).unwrap().kind, Some(NodeKind::Junction));

    for link in &net.links {
        let other = got.link(&link.id).unwrap();
        assert_eq!((&other.start, &other.end), (&link.start, &link.end));
        assert_eq!(other.geometry, link.geometry);
    }
    assert_eq!(got.link(&net.links[1].id).unwrap().kind, Some(LinkKind::Pump));
    assert_eq!(back.pipes.len(), 2);
}
