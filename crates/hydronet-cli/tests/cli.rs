// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `hydronet` binary.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use hydronet_geom::{LineString, Point};
use hydronet_topo::{Classification, Network, ZoneKind};
use predicates::prelude::*;
use tempfile::TempDir;

const TRIANGLE_WITH_PENDANT: &str = "[
    [[0, 0], [10, 0]],
    [[10, 0], [5, 8]],
    [[5, 8], [0, 0]],
    [[10, 0], [20, 0]]
]";

const LANDXML: &str = r#"<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
  <Surfaces>
    <Surface name="Ground">
      <Definition surfType="TIN">
        <Pnts><P id="1">-10 -10 50</P><P id="2">-10 30 90</P><P id="3">30 -10 50</P></Pnts>
        <Faces><F>1 2 3</F></Faces>
      </Definition>
    </Surface>
  </Surfaces>
  <PipeNetworks>
    <PipeNetwork name="North" pipeNetType="storm">
      <Structs>
        <Struct name="S1" elevRim="51" elevSump="48"><Center>0 0</Center></Struct>
        <Struct name="S2" elevRim="53" elevSump="49"><Center>0 20</Center></Struct>
      </Structs>
      <Pipes>
        <Pipe name="P1" refStart="S1" refEnd="S2" length="20.2"><CircPipe diameter="0.4"/></Pipe>
      </Pipes>
    </PipeNetwork>
  </PipeNetworks>
</LandXML>"#;

/// Binary isolated from the host's user config.
fn hydronet(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hydronet"));
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path());
    cmd
}

fn write(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn read_net(path: &Path) -> Network {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn assemble_fixture(dir: &TempDir) -> std::path::PathBuf {
    let lines = write(dir, "lines.json", TRIANGLE_WITH_PENDANT);
    let net = dir.path().join("net.json");
    hydronet(dir)
        .args(["assemble", "--lines"])
        .arg(&lines)
        .arg("--out")
        .arg(&net)
        .assert()
        .success();
    net
}

#[test]
fn help_lists_every_command() {
    let dir = TempDir::new().unwrap();
    let out = hydronet(&dir).arg("--help").output().unwrap();
    assert!(out.status.success());
    let help = String::from_utf8(out.stdout).unwrap();
    for cmd in [
        "assemble", "validate", "classify", "degrees", "split", "merge", "tgf", "to-inp", "from-inp",
        "elevations", "from-landxml", "config",
    ] {
        assert!(help.contains(cmd), "{cmd} missing from help");
    }
}

#[test]
fn assemble_validate_classify_pipeline() {
    let dir = TempDir::new().unwrap();
    let net_path = assemble_fixture(&dir);
    let net = read_net(&net_path);
    assert_eq!(net.nodes.len(), 4);
    assert_eq!(net.links.len(), 4);

    hydronet(&dir)
        .arg("validate")
        .arg(&net_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("undefined endpoints"));

    let out = hydronet(&dir)
        .args(["classify", "--json"])
        .arg(&net_path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let classes: BTreeMap<String, Classification> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(classes["L-1003"].kind, ZoneKind::Branched);
    for id in ["L-1000", "L-1001", "L-1002"] {
        assert_eq!(classes[id].kind, ZoneKind::Meshed, "{id}");
        assert_eq!(classes[id].subzone, 1);
    }

    hydronet(&dir)
        .arg("degrees")
        .arg(&net_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("N-1000"));

    hydronet(&dir)
        .arg("tgf")
        .arg(&net_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n#\n").and(predicate::str::contains("L-1003")));
}

#[test]
fn validate_fails_on_broken_references() {
    let dir = TempDir::new().unwrap();
    let net = write(
        &dir,
        "broken.json",
        r#"{
            "nodes": [
                {"id": "A", "point": [0, 0]},
                {"id": "B", "point": [1, 0]},
                {"id": "C", "point": [5, 5]}
            ],
            "links": [
                {"id": "P1", "start": "A", "end": "B", "geometry": [[0, 0], [1, 0]], "length": 1.0},
                {"id": "P2", "start": "B", "end": "Z", "geometry": [[1, 0], [2, 0]], "length": 1.0}
            ]
        }"#,
    );

    let out = hydronet(&dir)
        .args(["validate", "--json"])
        .arg(&net)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["orphan_nodes"], serde_json::json!(["C"]));
    assert_eq!(report["undefined_endpoints"], serde_json::json!(["P2"]));

    hydronet(&dir)
        .arg("degrees")
        .arg(&net)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node Z"));
}

#[test]
fn inp_round_trip_keeps_topology() {
    let dir = TempDir::new().unwrap();
    let net_path = assemble_fixture(&dir);
    let inp = dir.path().join("net.inp");
    hydronet(&dir)
        .arg("to-inp")
        .arg(&net_path)
        .arg("--out")
        .arg(&inp)
        .assert()
        .success();
    let text = fs::read_to_string(&inp).unwrap();
    assert!(text.contains("[PIPES]"));
    assert!(text.contains("[COORDINATES]"));

    let back_path = dir.path().join("back.json");
    let pipes_path = dir.path().join("pipes.json");
    hydronet(&dir)
        .arg("from-inp")
        .arg(&inp)
        .arg("--out")
        .arg(&back_path)
        .arg("--pipes")
        .arg(&pipes_path)
        .assert()
        .success();

    let original = read_net(&net_path);
    let back = read_net(&back_path);
    let ends = |n: &Network| {
        n.links
            .iter()
            .map(|l| (l.id.clone(), l.start.clone(), l.end.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ends(&back), ends(&original));
    assert!(pipes_path.exists());
}

#[test]
fn split_writes_fragments_in_the_output_format() {
    let dir = TempDir::new().unwrap();
    let lines = write(&dir, "lines.json", "[[[0, 0], [10, 0]], [[0, 5], [10, 5]]]");
    let points = write(&dir, "points.wkt", "Point(5 0)\nPoint(5 0.0001)\n");
    let out = dir.path().join("parts.wkt");

    hydronet(&dir)
        .args(["split", "--lines"])
        .arg(&lines)
        .arg("--points")
        .arg(&points)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let parts: Vec<LineString> = text.lines().map(|l| LineString::from_wkt(l).unwrap()).collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].vertices(), &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
    assert_eq!(parts[1].first(), Point::new(5.0, 0.0));
}

#[test]
fn merge_keeps_primary_nodes() {
    let dir = TempDir::new().unwrap();
    let net_path = assemble_fixture(&dir);
    let out = dir.path().join("merged.json");
    hydronet(&dir)
        .arg("merge")
        .arg(&net_path)
        .arg(&net_path)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let merged = read_net(&out);
    assert_eq!(merged.nodes, read_net(&net_path).nodes);
    assert_eq!(merged.links.len(), 8);
}

#[test]
fn invalid_tolerance_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let lines = write(&dir, "lines.json", TRIANGLE_WITH_PENDANT);
    hydronet(&dir)
        .args(["assemble", "--tolerance=-1", "--lines"])
        .arg(&lines)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tolerance"));
}

#[cfg(target_os = "linux")]
#[test]
fn flags_beat_config_file_beat_user_config() {
    let dir = TempDir::new().unwrap();
    let lines = write(&dir, "lines.json", "[[[0, 0], [1, 0]]]");
    let user = dir.path().join("config").join("hydronet");
    fs::create_dir_all(&user).unwrap();
    fs::write(
        user.join("hydronet.json"),
        r#"{"assemble": {"nodes": {"style": "prefix", "prefix": "U-", "start": 1, "increment": 1}}}"#,
    )
    .unwrap();
    let explicit = write(
        &dir,
        "explicit.json",
        r#"{"assemble": {"nodes": {"style": "mask", "mask": "C$$", "start": 1, "increment": 1}}}"#,
    );

    let first_node = |extra: &[&str]| {
        let out = dir.path().join("out.json");
        hydronet(&dir)
            .arg("assemble")
            .args(extra)
            .arg("--lines")
            .arg(&lines)
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
        read_net(&out).nodes[0].id.clone()
    };

    assert!(first_node(&[]).starts_with("U-"));
    let explicit_arg = explicit.to_str().unwrap();
    assert!(first_node(&["--config", explicit_arg]).starts_with('C'));
    assert!(first_node(&["--config", explicit_arg, "--node-prefix", "F-"]).starts_with("F-"));

    hydronet(&dir)
        .args(["assemble", "--config"])
        .arg(dir.path().join("missing.json"))
        .arg("--lines")
        .arg(&lines)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_save_persists_the_resolved_settings() {
    let dir = TempDir::new().unwrap();
    let lines = write(&dir, "lines.json", "[[[0, 0], [1, 0]]]");
    let stored = dir.path().join("config").join("hydronet").join("hydronet.json");

    hydronet(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hydronet.json"));

    hydronet(&dir)
        .args(["config", "save", "--split-tolerance", "0.25"])
        .assert()
        .success();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&stored).unwrap()).unwrap();
    assert_eq!(saved["split_tolerance"], serde_json::json!(0.25));

    // Import a team file into the user store; later runs use it without --config.
    let team = write(
        &dir,
        "team.json",
        r#"{"assemble": {"nodes": {"style": "mask", "mask": "T$$", "start": 1, "increment": 1}}}"#,
    );
    hydronet(&dir)
        .arg("--config")
        .arg(&team)
        .args(["config", "save"])
        .assert()
        .success();

    let out = hydronet(&dir).args(["config", "show"]).output().unwrap();
    assert!(out.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(shown["assemble"]["nodes"]["mask"], "T$$");

    let net = dir.path().join("net.json");
    hydronet(&dir)
        .args(["assemble", "--lines"])
        .arg(&lines)
        .arg("--out")
        .arg(&net)
        .assert()
        .success();
    assert_eq!(read_net(&net).nodes[0].id, "T01");

    hydronet(&dir)
        .args(["config", "save", "--tolerance=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tolerance"));
}

#[test]
fn landxml_network_and_surface_elevations() {
    let dir = TempDir::new().unwrap();
    let xml = write(&dir, "site.xml", LANDXML);
    let net_path = dir.path().join("north.json");
    let details = dir.path().join("north.details.json");
    hydronet(&dir)
        .arg("from-landxml")
        .arg(&xml)
        .arg("--out")
        .arg(&net_path)
        .arg("--details")
        .arg(&details)
        .assert()
        .success();
    let net = read_net(&net_path);
    assert_eq!(net.nodes.len(), 2);
    assert_eq!(net.nodes[1].point, Point::new(20.0, 0.0));
    let tables: serde_json::Value = serde_json::from_str(&fs::read_to_string(&details).unwrap()).unwrap();
    assert_eq!(tables["pipes"]["P1"]["section"]["diameter"], serde_json::json!(0.4));
    assert_eq!(tables["structures"]["S2"]["rim"], serde_json::json!(53.0));

    let draped = dir.path().join("draped.json");
    hydronet(&dir)
        .arg("elevations")
        .arg(&net_path)
        .arg("--tin")
        .arg(&xml)
        .arg("--out")
        .arg(&draped)
        .assert()
        .success();
    // Ground is 60 + x on this face.
    let elevations: Vec<f64> = read_net(&draped).nodes.iter().map(|n| n.elevation.unwrap()).collect();
    assert!((elevations[0] - 60.0).abs() < 1e-9);
    assert!((elevations[1] - 80.0).abs() < 1e-9);

    hydronet(&dir)
        .arg("elevations")
        .arg(&net_path)
        .args(["--surface", "Design", "--tin"])
        .arg(&xml)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ground"));

    hydronet(&dir)
        .args(["from-landxml", "--name", "South"])
        .arg(&xml)
        .assert()
        .failure()
        .stderr(predicate::str::contains("North"));
}
