// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Assembly, validation and classification over small hand-drawn networks.

use hydronet_geom::{LineString, Point};
use hydronet_topo::{
    assemble, degrees, merge, to_tgf, validate, AssembleOptions, Graph, IdPolicy, ZoneKind,
};

fn line(pts: &[(f64, f64)]) -> LineString {
    LineString::new(pts.iter().copied().map(Point::from).collect()).unwrap()
}

fn opts(tolerance: f64) -> AssembleOptions {
    AssembleOptions {
        tolerance,
        ..AssembleOptions::default()
    }
}

#[test]
fn near_coincident_ends_merge_only_within_tolerance() {
    let lines = [
        line(&[(0.0, 0.0), (10.0, 0.0)]),
        line(&[(10.0, 0.0005), (20.0, 0.0)]),
    ];

    let merged = assemble(&lines, &opts(0.01)).unwrap();
    assert_eq!(merged.nodes.len(), 3);
    assert_eq!(merged.links.len(), 2);
    assert_eq!(merged.links[0].end, merged.links[1].start);

    let apart = assemble(&lines, &opts(0.0001)).unwrap();
    assert_eq!(apart.nodes.len(), 4);
    assert_eq!(apart.links.len(), 2);
    assert_ne!(apart.links[0].end, apart.links[1].start);
}

#[test]
fn assembled_network_passes_validation() {
    let lines = [
        line(&[(0.0, 0.0), (10.0, 0.0)]),
        line(&[(10.0, 0.0), (10.0, 10.0)]),
        line(&[(10.0, 10.0), (0.0, 0.0)]),
        line(&[(10.0, 10.0), (15.0, 12.0), (20.0, 20.0)]),
    ];
    let net = assemble(&lines, &AssembleOptions::default()).unwrap();
    let report = validate(&net.nodes, &net.links);
    assert!(report.is_valid(), "{report:?}");

    let d = degrees(&net.nodes, &net.links).unwrap();
    assert_eq!(d.values().sum::<usize>(), 2 * net.links.len());
    assert!(to_tgf(&net).unwrap().lines().any(|l| l == "#"));
}

#[test]
fn custom_numbering_flows_into_ids() {
    let options = AssembleOptions {
        tolerance: 0.001,
        nodes: IdPolicy::mask("J-$$$", 1, 1),
        links: IdPolicy::prefix("P", 10, 10),
    };
    let net = assemble(&[line(&[(0.0, 0.0), (1.0, 0.0)])], &options).unwrap();
    let ids: Vec<&str> = net.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["J-001", "J-002"]);
    assert_eq!(net.links[0].id, "P10");
}

#[test]
fn path_is_one_branched_zone() {
    let net = assemble(
        &[
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 0.0)]),
            line(&[(2.0, 0.0), (3.0, 0.0)]),
        ],
        &AssembleOptions::default(),
    )
    .unwrap();
    let c = Graph::from_links(&net.links).unwrap().classify();
    assert_eq!(c.len(), 3);
    assert!(c
        .values()
        .all(|x| x.kind == ZoneKind::Branched && x.subzone == 1));
}

#[test]
fn triangle_is_one_meshed_zone() {
    let mut g = Graph::new();
    g.add_edge("e1", "a", "b").unwrap();
    g.add_edge("e2", "b", "c").unwrap();
    g.add_edge("e3", "c", "a").unwrap();
    let c = g.classify();
    assert!(c
        .values()
        .all(|x| x.kind == ZoneKind::Meshed && x.subzone == 1));
}

#[test]
fn triangle_with_pendant() {
    let mut g = Graph::new();
    g.add_edge("e1", "a", "b").unwrap();
    g.add_edge("e2", "b", "c").unwrap();
    g.add_edge("e3", "c", "a").unwrap();
    g.add_edge("e4", "c", "d").unwrap();
    let c = g.classify();
    assert_eq!(c["e4"].kind, ZoneKind::Branched);
    assert_eq!(c["e4"].subzone, 1);
    for e in ["e1", "e2", "e3"] {
        assert_eq!(c[e].kind, ZoneKind::Meshed);
        assert_eq!(c[e].subzone, 1);
    }
}

#[test]
fn merged_networks_share_ids() {
    let a = assemble(&[line(&[(0.0, 0.0), (1.0, 0.0)])], &AssembleOptions::default()).unwrap();
    let b = assemble(&[line(&[(0.0, 0.0), (0.0, 1.0)])], &AssembleOptions::default()).unwrap();
    let r = merge(&a, &b);
    // Both networks number their first two nodes N-1000/N-1001.
    assert_eq!(r.shared_nodes, 2);
    assert_eq!(r.network.nodes.len(), 2);
    assert_eq!(r.network.links.len(), 2);
    assert!(!validate(&r.network.nodes, &r.network.links).is_valid());
}
