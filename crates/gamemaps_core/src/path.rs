//! Movement and trigger routes

use serde::{Deserialize, Serialize};

use crate::MapError;

/// A 2D coordinate. Whether it counts tiles or pixels is up to the format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    points: Vec<Point>,
    /// Where the route begins, when the format stores it apart from the points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Point>,
    /// Last point connects back to the first
    #[serde(default)]
    pub closed: bool,
    /// Layer whose coordinate space the points are in, for map-level paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<usize>,
    /// Point count cannot change, only the coordinates
    #[serde(default)]
    fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_points: Option<usize>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// A path whose length the format cannot change
    pub fn fixed(points: Vec<Point>) -> Self {
        Self {
            points,
            fixed: true,
            ..Default::default()
        }
    }

    /// Limit how many points the path may hold.
    ///
    /// Fails if the path already holds more than `max` points.
    pub fn with_max_points(mut self, max: usize) -> Result<Self, MapError> {
        if self.points.len() > max {
            return Err(MapError::PathFull { limit: max });
        }
        self.max_points = Some(max);
        Ok(self)
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = Some(start);
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Move existing points. The point count stays the same.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn max_points(&self) -> Option<usize> {
        self.max_points
    }

    /// Append a point, honouring `fixed` and `max_points`
    pub fn push_point(&mut self, point: impl Into<Point>) -> Result<(), MapError> {
        if self.fixed {
            return Err(MapError::PathFull {
                limit: self.points.len(),
            });
        }
        if let Some(limit) = self.max_points {
            if self.points.len() >= limit {
                return Err(MapError::PathFull { limit });
            }
        }
        self.points.push(point.into());
        Ok(())
    }

    /// Remove and return the last point. Fixed paths return `None`.
    pub fn pop_point(&mut self) -> Option<Point> {
        if self.fixed {
            return None;
        }
        self.points.pop()
    }

    /// Bounding box `(min, max)` of all points, or `None` for an empty path
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

#[derive(Deserialize)]
struct RawPath {
    points: Vec<Point>,
    #[serde(default)]
    start: Option<Point>,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    layer: Option<usize>,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    max_points: Option<usize>,
}

impl TryFrom<RawPath> for Path {
    type Error = MapError;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        let mut path = Path::new(raw.points);
        if let Some(max) = raw.max_points {
            path = path.with_max_points(max)?;
        }
        path.start = raw.start;
        path.closed = raw.closed;
        path.layer = raw.layer;
        path.fixed = raw.fixed;
        Ok(path)
    }
}
