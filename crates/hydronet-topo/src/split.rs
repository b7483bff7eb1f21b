// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tolerance-aware polyline splitting.

use hydronet_geom::{LineString, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Splits `line` where `point` lies on it within `tolerance`.
///
/// Segments are scanned in order and the first one that accepts the point
/// wins. A point near an interior vertex splits at that vertex; a point near
/// the first or last vertex of the whole line yields `None`, as does a point
/// off the line. Otherwise the projected point becomes the shared vertex of
/// both parts. Segments no longer than `tolerance` are skipped.
#[must_use]
pub fn split(line: &LineString, point: Point, tolerance: f64) -> Option<(LineString, LineString)> {
    // Line ends are checked first: a short end segment is skipped by the
    // scan below, which would let its far vertex claim the point.
    if point.distance(line.first()) <= tolerance || point.distance(line.last()) <= tolerance {
        trace!("point near a line end");
        return None;
    }
    let last = line.num_segments() - 1;
    for (i, segment) in line.segments().enumerate() {
        if segment.length() <= tolerance {
            continue;
        }
        let Some(frame) = segment.frame(point) else {
            continue;
        };
        if frame.offset.abs() > tolerance {
            continue;
        }
        if frame.along.abs() <= tolerance {
            trace!(segment = i, "point near segment start");
            return if i == 0 { None } else { line.split_at_vertex(i) };
        }
        if (frame.along - frame.length).abs() <= tolerance {
            trace!(segment = i, "point near segment end");
            return if i == last {
                None
            } else {
                line.split_at_vertex(i + 1)
            };
        }
        if tolerance < frame.along && frame.along < frame.length - tolerance {
            trace!(segment = i, along = frame.along, "interior split");
            return line.split_at_point(i, frame.projection());
        }
    }
    None
}

/// Applies [`split`] for each point in turn, always to the first fragment
/// that accepts it. Points that hit no fragment are skipped.
#[must_use]
pub fn split_many(line: &LineString, points: &[Point], tolerance: f64) -> Vec<LineString> {
    let mut parts = vec![line.clone()];
    for &p in points {
        let hit = parts
            .iter()
            .enumerate()
            .find_map(|(k, part)| split(part, p, tolerance).map(|pair| (k, pair)));
        if let Some((k, (head, tail))) = hit {
            parts[k] = tail;
            parts.insert(k, head);
        }
    }
    parts
}

/// Drops points within `tolerance` of an earlier accepted point.
///
/// Returns the accepted points in input order and the number discarded.
pub fn dedup_points(points: &[Point], tolerance: f64) -> (Vec<Point>, usize) {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !kept.iter().any(|k| k.distance(p) <= tolerance) {
            kept.push(p);
        }
    }
    let discarded = points.len() - kept.len();
    (kept, discarded)
}

/// Fragments produced from one input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitLine {
    /// Index of the input line.
    pub source: usize,
    /// Fragments in line order; a single element when nothing split.
    pub parts: Vec<LineString>,
}

impl SplitLine {
    /// `true` when the line was cut at least once.
    #[must_use]
    pub fn was_split(&self) -> bool {
        self.parts.len() > 1
    }
}

/// Result of [`split_lines_at_points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitReport {
    /// One entry per input line, in input order.
    pub lines: Vec<SplitLine>,
    /// Points dropped as near-duplicates.
    pub discarded_points: usize,
}

impl SplitReport {
    /// All fragments, flattened in line order.
    pub fn fragments(&self) -> impl Iterator<Item = &LineString> + '_ {
        self.lines.iter().flat_map(|l| l.parts.iter())
    }
}

/// Splits every line at every nearby point.
///
/// Points are deduplicated first. Each line only considers the points inside
/// its bounds grown by `tolerance`.
#[instrument(level = "debug", skip(lines, points), fields(lines = lines.len(), points = points.len()))]
pub fn split_lines_at_points(lines: &[LineString], points: &[Point], tolerance: f64) -> SplitReport {
    let (points, discarded_points) = dedup_points(points, tolerance);
    if discarded_points > 0 {
        debug!(discarded_points, "near-duplicate split points dropped");
    }

    let lines: Vec<SplitLine> = lines
        .iter()
        .enumerate()
        .map(|(source, line)| {
            let window = line.bounds().inflate(tolerance);
            let near: Vec<Point> = points.iter().copied().filter(|p| window.contains(*p)).collect();
            let parts = if near.is_empty() {
                vec![line.clone()]
            } else {
                split_many(line, &near, tolerance)
            };
            SplitLine { source, parts }
        })
        .collect();

    debug!(
        split = lines.iter().filter(|l| l.was_split()).count(),
        "lines split at points"
    );
    SplitReport {
        lines,
        discarded_points,
    }
}
