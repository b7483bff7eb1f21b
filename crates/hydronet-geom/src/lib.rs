// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Planar geometry primitives for hydronet.

This crate provides:
- Points and displacement vectors (`Point`, `Vec2`).
- Validated polylines (`LineString`) and their segments (`Segment`).
- Segment-local projection (`SegmentFrame`) used by the line splitter.
- Axis-aligned bounds (`Bounds`) and a WKT text form.
- Triangulated surfaces (`Tin`) for planar elevation lookup.

Design notes:
- `f64` throughout; coordinates are projected map units.
- Tolerance decisions belong to callers. Construction only rejects input that
  no tolerance can rescue (too few vertices, non-finite coordinates).
"]

mod bounds;
mod error;
mod line;
mod point;
mod tin;
mod wkt;

pub use bounds::Bounds;
pub use error::GeometryError;
pub use line::{LineString, Segment, SegmentFrame};
pub use point::{Point, Vec2};
pub use tin::{SurfacePoint, Tin, Triangle};

/// Checks that `tolerance` is finite and non-negative.
///
/// # Errors
/// [`GeometryError::InvalidTolerance`] otherwise.
pub fn check_tolerance(tolerance: f64) -> Result<f64, GeometryError> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(GeometryError::InvalidTolerance(tolerance))
    }
}
