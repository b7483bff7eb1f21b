// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! File readers and writers shared by the subcommands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use hydronet_geom::{LineString, Point};
use hydronet_topo::Network;
use serde::{de::DeserializeOwned, Serialize};

/// `true` when `path` holds one WKT geometry per line.
fn is_wkt(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wkt") || e.eq_ignore_ascii_case("txt"))
}

/// Reads a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn read_wkt<T>(path: &Path, parse: impl Fn(&str) -> Result<T, hydronet_geom::GeometryError>) -> Result<Vec<T>> {
    read_text(path)?
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(n, l)| parse(l).with_context(|| format!("{}:{}", path.display(), n + 1)))
        .collect()
}

/// Reads line strings from JSON (`[[[x, y], ...], ...]`) or WKT.
pub fn read_lines(path: &Path) -> Result<Vec<LineString>> {
    if is_wkt(path) {
        read_wkt(path, LineString::from_wkt)
    } else {
        read_json(path)
    }
}

/// Reads points from JSON (`[[x, y], ...]`) or WKT.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    if is_wkt(path) {
        read_wkt(path, Point::from_wkt)
    } else {
        read_json(path)
    }
}

/// Reads a network JSON file.
pub fn read_network(path: &Path) -> Result<Network> {
    read_json(path)
}

/// Writes `text` to `out`, or to stdout when `out` is `None`.
pub fn write_text(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

/// Writes `value` as pretty JSON to `out` or stdout.
pub fn write_json<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    write_text(out, &text)
}

/// Writes lines in the format [`read_lines`] picks for `out`; JSON on stdout.
pub fn write_lines<'a>(out: Option<&Path>, lines: impl IntoIterator<Item = &'a LineString>) -> Result<()> {
    if out.is_some_and(is_wkt) {
        let text: String = lines.into_iter().map(|l| l.to_wkt() + "\n").collect();
        write_text(out, &text)
    } else {
        write_json(out, &lines.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{read_lines, read_points, write_lines};
    use hydronet_geom::Point;
    use std::fs;

    #[test]
    fn reads_json_and_wkt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("lines.json");
        fs::write(&json, "[[[0,0],[1,0]],[[1,0],[1,1],[2,1]]]").unwrap();
        let wkt = dir.path().join("lines.wkt");
        fs::write(&wkt, "LineString(0 0, 1 0)\n\nLINESTRING (1 0, 1 1, 2 1)\n").unwrap();

        let a = read_lines(&json).unwrap();
        let b = read_lines(&wkt).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[1].num_vertices(), 3);
    }

    #[test]
    fn wkt_errors_name_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let wkt = dir.path().join("pts.txt");
        fs::write(&wkt, "Point(1 2)\nPoint(oops)\n").unwrap();
        let err = read_points(&wkt).unwrap_err();
        assert!(format!("{err:#}").contains("pts.txt:2"));

        fs::write(&wkt, "Point(1 2)\n").unwrap();
        assert_eq!(read_points(&wkt).unwrap(), vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn written_lines_read_back_in_either_format() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.json");
        fs::write(&src, "[[[0,0],[1,0]],[[1,0],[1,1.5]]]").unwrap();
        let lines = read_lines(&src).unwrap();

        for name in ["out.json", "out.wkt"] {
            let out = dir.path().join(name);
            write_lines(Some(&out), &lines).unwrap();
            assert_eq!(read_lines(&out).unwrap(), lines, "{name}");
        }
        let wkt = fs::read_to_string(dir.path().join("out.wkt")).unwrap();
        assert_eq!(wkt.lines().count(), 2);
    }
}
