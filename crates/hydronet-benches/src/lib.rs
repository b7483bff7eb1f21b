// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Synthetic, deterministic inputs for the hydronet benchmarks.
//!
//! The grid has `n * n` junctions at [`SPACING`], one bent line per grid edge
//! and one spur hanging below each bottom junction, so assembled networks
//! carry both meshed and branched zones. Line ends are offset by less than
//! [`JITTER`], which keeps them within the default assembly tolerance.

#![forbid(unsafe_code)]

use hydronet_geom::{LineString, Point};

/// Distance between neighbouring grid junctions.
pub const SPACING: f64 = 10.0;

/// Upper bound of the per-endpoint offset.
pub const JITTER: f64 = 2.0e-4;

fn jitter(a: u32, b: u32, salt: u32) -> f64 {
    let h = (a.wrapping_mul(7919) ^ b.wrapping_mul(104_729) ^ salt.wrapping_mul(31)) % 1000;
    f64::from(h) * (JITTER / 1000.0)
}

fn at(i: u32, j: u32, salt: u32) -> Point {
    Point::new(
        SPACING * f64::from(i) + jitter(i, j, salt),
        SPACING * f64::from(j) - jitter(j, i, salt),
    )
}

fn bent(a: Point, b: Point) -> Option<LineString> {
    let mid = Point::new(
        (a.x + b.x) / 2.0 + (b.y - a.y) * 0.1,
        (a.y + b.y) / 2.0 - (b.x - a.x) * 0.1,
    );
    LineString::new(vec![a, mid, b]).ok()
}

/// Lines of an `n * n` grid plus `n` spurs.
pub fn grid_lines(n: u32) -> Vec<LineString> {
    let mut lines = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i + 1 < n {
                lines.extend(bent(at(i, j, 0), at(i + 1, j, 1)));
            }
            if j + 1 < n {
                lines.extend(bent(at(i, j, 2), at(i, j + 1, 3)));
            }
        }
        let foot = at(i, 0, 4);
        lines.extend(bent(foot, Point::new(foot.x, foot.y - SPACING)));
    }
    lines
}

/// Midpoint of the first segment of every line: one interior split each.
pub fn split_points(lines: &[LineString]) -> Vec<Point> {
    lines
        .iter()
        .filter_map(|l| l.segments().next())
        .map(|s| Point::new((s.a.x + s.b.x) / 2.0, (s.a.y + s.b.y) / 2.0))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{grid_lines, split_points};
    use hydronet_topo::{assemble, AssembleOptions};

    #[test]
    fn grid_assembles_to_expected_size() {
        let n = 4;
        let lines = grid_lines(n);
        assert_eq!(lines.len(), 2 * 4 * 3 + 4);
        let net = assemble(&lines, &AssembleOptions::default()).unwrap();
        assert_eq!(net.nodes.len(), 4 * 4 + 4);
        assert_eq!(split_points(&lines).len(), lines.len());
    }
}
