//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326, EPSG:4283), coordinates are in degrees.
/// For projected CRS (EPSG:3857, etc.), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a WMS BBOX parameter string: "minx,miny,maxx,maxy"
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            min_x: parse_number(parts[0])?,
            min_y: parse_number(parts[1])?,
            max_x: parse_number(parts[2])?,
            max_y: parse_number(parts[3])?,
        })
    }

    /// Parse the WKT polygon a catalogue record stores as its bounding box.
    ///
    /// The ring is the fixed 5-point rectangle
    /// `POLYGON((minx miny, minx maxy, maxx maxy, maxx miny, minx miny))`,
    /// so the first and third points are the min and max corners.
    pub fn from_wkt_polygon(wkt: &str) -> Result<Self, BboxParseError> {
        let trimmed = wkt.trim();
        let upper = trimmed.to_ascii_uppercase();
        let body = upper
            .strip_prefix("POLYGON")
            .map(str::trim_start)
            .ok_or_else(|| BboxParseError::InvalidWkt(wkt.to_string()))?;

        let ring = body
            .strip_prefix("((")
            .and_then(|s| s.strip_suffix("))"))
            .ok_or_else(|| BboxParseError::InvalidWkt(wkt.to_string()))?;

        let points = ring
            .split(',')
            .map(|point| {
                let coords: Vec<&str> = point.split_whitespace().collect();
                if coords.len() != 2 {
                    return Err(BboxParseError::InvalidWkt(wkt.to_string()));
                }
                Ok((parse_number(coords[0])?, parse_number(coords[1])?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if points.len() != 5 {
            return Err(BboxParseError::InvalidWkt(wkt.to_string()));
        }

        let (min_x, min_y) = points[0];
        let (max_x, max_y) = points[2];
        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Lenient variant of [`from_wkt_polygon`](Self::from_wkt_polygon):
    /// an empty or unparseable value means the record has no bounding box.
    pub fn from_stored_wkt(wkt: Option<&str>) -> Option<Self> {
        let wkt = wkt?.trim();
        if wkt.is_empty() {
            return None;
        }
        match Self::from_wkt_polygon(wkt) {
            Ok(bbox) => Some(bbox),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparseable bounding box");
                None
            }
        }
    }

    /// Write this box as the 5-point WKT ring stored on catalogue records.
    pub fn to_wkt_polygon(&self) -> String {
        format!(
            "POLYGON(({} {}, {} {}, {} {}, {} {}, {} {}))",
            self.min_x,
            self.min_y,
            self.min_x,
            self.max_y,
            self.max_x,
            self.max_y,
            self.max_x,
            self.min_y,
            self.min_x,
            self.min_y
        )
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Check if `other` lies inside this bbox on all four sides (edges count as inside).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// Shrink to the sub-rectangle sent with non-GeoServer WFS requests.
    ///
    /// Each axis becomes `half ∓ half * percent / 2` with `half = (max - min) / 2`.
    pub fn shrunk(&self, percent: f64) -> BoundingBox {
        // NOTE: measured from the coordinate origin, not the box center, so the
        // result only overlaps the original box when it straddles zero. Matches
        // the links already stored by the catalogue.
        let half_x = self.width() / 2.0;
        let half_y = self.height() / 2.0;
        BoundingBox::new(
            half_x - half_x * percent / 2.0,
            half_y - half_y * percent / 2.0,
            half_x + half_x * percent / 2.0,
            half_y + half_y * percent / 2.0,
        )
    }

    /// Format as a BBOX query value, `minx,miny,maxx,maxy`.
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Format as a BBOX query value with swapped axes, `miny,minx,maxy,maxx`.
    pub fn to_swapped_query_value(&self) -> String {
        format!("{},{},{},{}", self.min_y, self.min_x, self.max_y, self.max_x)
    }
}

fn parse_number(s: &str) -> Result<f64, BboxParseError> {
    s.parse()
        .map_err(|_| BboxParseError::InvalidNumber(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("Invalid WKT bounding polygon: {0}")]
    InvalidWkt(String),
}
