//! The slice of a catalogue record that link generation reads and writes.

use serde::{Deserialize, Serialize};

use crate::link::{LinkList, ServiceLink};
use crate::{BoundingBox, CrsCode, OwsError, OwsResult};

/// CRS assumed for records that do not declare one.
pub const DEFAULT_RECORD_CRS: CrsCode = CrsCode::EPSG_4326;

/// A catalogue record as persisted by the catalogue database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub identifier: String,

    /// WKT polygon of the record's extent
    #[serde(default)]
    pub bounding_box: Option<String>,

    #[serde(default)]
    pub crs: Option<String>,

    /// `^`-joined stored service links
    #[serde(default)]
    pub links: Option<String>,

    #[serde(default)]
    pub service_type: Option<String>,

    #[serde(default)]
    pub service_type_version: Option<String>,

    /// Name of the default SLD style
    #[serde(default)]
    pub sld: Option<String>,

    /// Name of the default QML style
    #[serde(default)]
    pub qml: Option<String>,

    /// Name of the default LYR style
    #[serde(default)]
    pub lyr: Option<String>,
}

impl Record {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to set the bounding box from coordinates.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox.to_wkt_polygon());
        self
    }

    /// Builder-style helper to set the CRS.
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    /// Parsed bounding box; `None` when absent or unparseable.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_stored_wkt(self.bounding_box.as_deref())
    }

    /// Parsed CRS, defaulting to EPSG:4326 when the record has none.
    pub fn crs(&self) -> OwsResult<CrsCode> {
        match self.crs.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_RECORD_CRS),
            Some(crs) => CrsCode::from_wms_string(crs).map_err(|_| {
                OwsError::InvalidCrs(format!("{} (record '{}')", crs, self.identifier))
            }),
        }
    }

    /// Links currently stored on the record.
    pub fn link_list(&self) -> LinkList {
        self.links.as_deref().map(LinkList::parse).unwrap_or_default()
    }

    /// Store `link`, replacing any existing link with the same key.
    ///
    /// Only the in-memory record changes; persisting it is up to the caller.
    pub fn store_link(&mut self, link: ServiceLink) -> OwsResult<Option<ServiceLink>> {
        let mut links = self.link_list();
        let replaced = links.upsert(link);
        self.links = Some(links.to_stored()?);
        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinkSchema;

    #[test]
    fn test_record_defaults_to_wgs84() {
        let record = Record::new("ns:layer1");
        assert_eq!(record.crs().unwrap(), CrsCode::EPSG_4326);
        assert!(record.bbox().is_none());
        assert!(record.link_list().is_empty());
    }

    #[test]
    fn test_invalid_record_crs() {
        let record = Record::new("ns:layer1").with_crs("WGS84");
        let err = record.crs().unwrap_err();
        assert!(err.to_string().contains("ns:layer1"));
    }

    #[test]
    fn test_store_link_replaces() {
        let mut record = Record::new("ns:layer1");
        let link = |url: &str| {
            ServiceLink::new(
                LinkSchema {
                    protocol: "OGC:WFS".to_string(),
                    ..Default::default()
                },
                url,
            )
        };

        assert!(record.store_link(link("a")).unwrap().is_none());
        assert_eq!(record.store_link(link("b")).unwrap().unwrap().url, "a");
        assert_eq!(
            record.links.as_deref(),
            Some("None\tNone\t{\"protocol\":\"OGC:WFS\"}\tb")
        );
    }
}
