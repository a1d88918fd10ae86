//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An `EPSG:<code>` CRS identifier.
///
/// Catalogue records and endpoints spell codes in any case ("epsg:4326"),
/// parsing normalizes them to the upper-case form used in generated links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CrsCode(u32);

impl CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    pub const EPSG_4326: CrsCode = CrsCode(4326);
    /// Web Mercator (meters)
    pub const EPSG_3857: CrsCode = CrsCode(3857);
    /// Unofficial Web Mercator code still declared by older GeoServer endpoints
    pub const EPSG_900913: CrsCode = CrsCode(900913);
    /// GDA94 Geographic, used for the Australian default extent
    pub const EPSG_4283: CrsCode = CrsCode(4283);

    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Parse a CRS string from a record or endpoint parameter.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:3857"
    /// - "EPSG:900913"
    ///
    /// The declared code is kept as written; see [`canonical`](Self::canonical).
    pub fn from_wms_string(s: &str) -> Result<Self, CrsParseError> {
        let trimmed = s.trim();
        trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("EPSG:"))
            .and_then(|_| trimmed[5..].parse::<u32>().ok())
            .map(CrsCode)
            .ok_or_else(|| CrsParseError::InvalidCrs(s.to_string()))
    }

    /// Numeric EPSG code.
    pub fn code(&self) -> u32 {
        self.0
    }

    /// The registered code this one stands for: EPSG:900913 is EPSG:3857.
    pub fn canonical(&self) -> CrsCode {
        match *self {
            CrsCode::EPSG_900913 => CrsCode::EPSG_3857,
            other => other,
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for CrsCode {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wms_string(s)
    }
}

impl TryFrom<String> for CrsCode {
    type Error = CrsParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_wms_string(&value)
    }
}

impl From<CrsCode> for String {
    fn from(value: CrsCode) -> Self {
        value.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Invalid CRS: {0}. Expected 'EPSG:<code>'")]
    InvalidCrs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(
            CrsCode::from_wms_string("EPSG:4326").unwrap(),
            CrsCode::EPSG_4326
        );
        assert_eq!(
            CrsCode::from_wms_string("epsg:3857").unwrap(),
            CrsCode::EPSG_3857
        );
        assert_eq!(
            CrsCode::from_wms_string("EPSG:900913").unwrap(),
            CrsCode::EPSG_900913
        );
        assert_eq!(CrsCode::from_wms_string("EPSG:28350").unwrap().code(), 28350);
        assert!(CrsCode::from_wms_string("CRS:84").is_err());
        assert!(CrsCode::from_wms_string("EPSG:").is_err());
        assert!(CrsCode::from_wms_string("").is_err());
    }

    #[test]
    fn test_legacy_mercator_keeps_declared_code() {
        let crs = CrsCode::from_wms_string("epsg:900913").unwrap();
        assert_eq!(crs.to_string(), "EPSG:900913");
        assert_eq!(crs.canonical(), CrsCode::EPSG_3857);
        assert_eq!(CrsCode::EPSG_4326.canonical(), CrsCode::EPSG_4326);
    }

    #[test]
    fn test_display() {
        assert_eq!(CrsCode::new(4283).to_string(), "EPSG:4283");
        let parsed: CrsCode = "epsg:4283".parse().unwrap();
        assert_eq!(parsed.to_string(), "EPSG:4283");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&CrsCode::EPSG_3857).unwrap();
        assert_eq!(json, "\"EPSG:3857\"");
        let back: CrsCode = serde_json::from_str("\"epsg:4326\"").unwrap();
        assert_eq!(back, CrsCode::EPSG_4326);
    }
}
