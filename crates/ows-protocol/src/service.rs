//! OGC service types and protocol versions.

use std::fmt;
use std::str::FromStr;

use ows_common::OwsError;
use serde::{Deserialize, Serialize};

/// Service a link is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    /// Web Map Service GetMap
    Wms,
    /// Web Feature Service GetFeature
    Wfs,
    /// GeoWebCache, requested through its WMS interface with a tile-aligned BBOX
    Gwc,
}

impl ServiceType {
    /// Protocol recorded in the link schema. GeoWebCache links are WMS links.
    pub fn protocol(&self) -> &'static str {
        match self {
            ServiceType::Wms | ServiceType::Gwc => "OGC:WMS",
            ServiceType::Wfs => "OGC:WFS",
        }
    }

    /// Endpoint parameters that declare the CRS of the request, in lookup order.
    pub fn crs_params(&self) -> &'static [&'static str] {
        match self {
            ServiceType::Wfs => &["SRSNAME"],
            ServiceType::Wms | ServiceType::Gwc => &["SRS", "CRS"],
        }
    }
}

impl FromStr for ServiceType {
    type Err = OwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WMS" => Ok(ServiceType::Wms),
            "WFS" => Ok(ServiceType::Wfs),
            "GWC" => Ok(ServiceType::Gwc),
            _ => Err(OwsError::UnknownServiceType(s.to_string())),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceType::Wms => "WMS",
            ServiceType::Wfs => "WFS",
            ServiceType::Gwc => "GWC",
        };
        f.write_str(name)
    }
}

/// Normalize the free-form version a record declares.
///
/// Short forms map onto the three versions that change request syntax;
/// anything else is passed through unchanged.
pub fn normalize_version(version: &str) -> String {
    match version.trim() {
        "1.1.0" | "1.1" => "1.1.0".to_string(),
        "2.0.0" | "2" | "2.0" => "2.0.0".to_string(),
        "1" | "1.0" | "1.0.0" => "1.0.0".to_string(),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_type() {
        assert_eq!("WMS".parse::<ServiceType>().unwrap(), ServiceType::Wms);
        assert_eq!("wfs".parse::<ServiceType>().unwrap(), ServiceType::Wfs);
        assert_eq!(" Gwc ".parse::<ServiceType>().unwrap(), ServiceType::Gwc);
    }

    #[test]
    fn test_unknown_service_type() {
        let err = "BOGUS".parse::<ServiceType>().unwrap_err();
        assert!(matches!(&err, OwsError::UnknownServiceType(t) if t == "BOGUS"));
        assert!(err.to_string().contains("BOGUS"));
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("1.1"), "1.1.0");
        assert_eq!(normalize_version("1.1.0"), "1.1.0");
        assert_eq!(normalize_version("2"), "2.0.0");
        assert_eq!(normalize_version("2.0"), "2.0.0");
        assert_eq!(normalize_version("1"), "1.0.0");
        assert_eq!(normalize_version("1.0"), "1.0.0");
        assert_eq!(normalize_version("1.3.0"), "1.3.0");
        assert_eq!(normalize_version("1.1.1"), "1.1.1");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn test_protocol() {
        assert_eq!(ServiceType::Gwc.protocol(), "OGC:WMS");
        assert_eq!(ServiceType::Wfs.protocol(), "OGC:WFS");
        assert_eq!(ServiceType::Wfs.to_string(), "WFS");
    }
}
