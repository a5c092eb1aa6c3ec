use crate::core::geo::Point;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in map units.
///
/// Serialized as `[min_x, min_y, max_x, max_y]`. An extent whose minimum
/// exceeds its maximum on either axis is empty; empty extents intersect
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Like [`Extent::new`], but rejects inverted or non-finite corners
    pub fn try_new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let extent = Self::new(min_x, min_y, max_x, max_y);
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(MapError::InvalidExtent(format!(
                "non-finite corner in {:?}",
                extent.to_array()
            )));
        }
        if extent.is_empty() {
            return Err(MapError::InvalidExtent(format!(
                "minimum exceeds maximum in {:?}",
                extent.to_array()
            )));
        }
        Ok(extent)
    }

    /// Creates an extent from a center point and size
    pub fn from_center_and_size(center: Point, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    /// Smallest extent containing all `points`; empty if there are none
    pub fn bounding(points: &[Point]) -> Self {
        let mut extent = Self::empty();
        for point in points {
            extent.extend(point);
        }
        extent
    }

    /// Creates an empty extent that can be extended
    pub fn empty() -> Self {
        Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Checks if the extent contains a point (edges included)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Checks if `other` lies entirely inside this extent
    pub fn contains_extent(&self, other: &Extent) -> bool {
        !other.is_empty()
            && self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
    }

    /// Checks if the extents share at least one point
    pub fn intersects(&self, other: &Extent) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Gets the intersection of two extents
    pub fn intersection(&self, other: &Extent) -> Option<Extent> {
        if !self.intersects(other) {
            return None;
        }

        Some(Extent::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Extends the extent to include a point
    pub fn extend(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Returns a copy grown by `value` on every side
    pub fn buffer(&self, value: f64) -> Extent {
        Extent::new(
            self.min_x - value,
            self.min_y - value,
            self.max_x + value,
            self.max_y + value,
        )
    }

    /// Returns a copy scaled by `factor` around its center
    pub fn scale_from_center(&self, factor: f64) -> Extent {
        let center = self.center();
        Extent::from_center_and_size(center, self.width() * factor, self.height() * factor)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl From<[f64; 4]> for Extent {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Extent> for [f64; 4] {
    fn from(extent: Extent) -> Self {
        extent.to_array()
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}
