// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Well-known-text form of points and line strings.
//!
//! Parsing and formatting go through `wkt` and `geo-types`; only the planar
//! `POINT` and `LINESTRING` forms convert, other geometry types are rejected.

use wkt::{ToWkt, TryFromWkt};

use crate::error::GeometryError;
use crate::line::LineString;
use crate::point::Point;

fn wkt_error(err: impl core::fmt::Display) -> GeometryError {
    GeometryError::Wkt(err.to_string())
}

impl From<geo_types::Coord<f64>> for Point {
    fn from(c: geo_types::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Point> for geo_types::Coord<f64> {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl Point {
    /// Parses `Point(x y)` (case-insensitive).
    ///
    /// # Errors
    /// [`GeometryError::Wkt`] on malformed text or another geometry type,
    /// [`GeometryError::NonFinite`] for NaN/infinite ordinates.
    pub fn from_wkt(text: &str) -> Result<Self, GeometryError> {
        let p = geo_types::Point::<f64>::try_from_wkt_str(text.trim()).map_err(wkt_error)?;
        let p = Self::from(p.0);
        if p.is_finite() {
            Ok(p)
        } else {
            Err(GeometryError::NonFinite)
        }
    }

    /// Formats the point as `POINT(x y)`.
    #[must_use]
    pub fn to_wkt(&self) -> String {
        geo_types::Point(geo_types::Coord::from(*self)).wkt_string()
    }
}

impl LineString {
    /// Parses `LineString(x y, x y, ...)` (case-insensitive).
    ///
    /// # Errors
    /// [`GeometryError::Wkt`] on malformed text or another geometry type,
    /// plus the usual [`LineString::new`] validation errors.
    pub fn from_wkt(text: &str) -> Result<Self, GeometryError> {
        let line =
            geo_types::LineString::<f64>::try_from_wkt_str(text.trim()).map_err(wkt_error)?;
        Self::new(line.0.into_iter().map(Point::from).collect())
    }

    /// Formats the line as `LINESTRING(x y,x y,...)`.
    #[must_use]
    pub fn to_wkt(&self) -> String {
        geo_types::LineString::from(
            self.vertices()
                .iter()
                .map(|&p| geo_types::Coord::from(p))
                .collect::<Vec<_>>(),
        )
        .wkt_string()
    }
}
