//! Common test fixtures for link generation tests.
//!
//! Boxes are plain `(min_x, min_y, max_x, max_y)` tuples so this crate does
//! not depend on the crates it helps test.

/// Common bounding box definitions for testing.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Default Australian extent used for previews of records without a box (EPSG:4283)
    pub const AUSTRALIA: (f64, f64, f64, f64) = (108.0, -45.0, 155.0, -10.0);

    /// Western Australia south-west corner, the usual record extent
    pub const PERTH_REGION: (f64, f64, f64, f64) = (110.0, -35.0, 120.0, -25.0);

    /// Small box around Perth CBD
    pub const PERTH_CBD: (f64, f64, f64, f64) = (115.84, -31.97, 115.88, -31.94);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (115.86, -31.95, 115.86, -31.95);

    /// Extends past the antimeridian, outside every grid
    pub const BEYOND_GRID: (f64, f64, f64, f64) = (170.0, -20.0, 190.0, -10.0);

    /// Full Web Mercator extent in meters
    pub const WEB_MERCATOR_WORLD: (f64, f64, f64, f64) = (
        -20037508.34,
        -20037508.34,
        20037508.34,
        20037508.34,
    );
}

/// Stored WKT polygons as found in the catalogue database.
pub mod wkt {
    /// Ring for `bbox::PERTH_REGION`
    pub const PERTH_REGION: &str = "POLYGON((110 -35, 110 -25, 120 -25, 120 -35, 110 -35))";

    /// Same ring with the spacing pycsw writes
    pub const PERTH_REGION_SPACED: &str =
        "POLYGON ((110.00 -35.00, 110.00 -25.00, 120.00 -25.00, 120.00 -35.00, 110.00 -35.00))";

    /// Not a polygon
    pub const POINT: &str = "POINT(115.86 -31.95)";

    /// Ring with a missing vertex
    pub const SHORT_RING: &str = "POLYGON((110 -35, 110 -25, 120 -25, 110 -35))";
}

/// Common service endpoints.
pub mod endpoints {
    pub const GEOSERVER_WMS: &str = "http://geoserver.example/wms";
    pub const GEOSERVER_WFS: &str = "https://kmi.geoserver.example/geoserver/ows";
    pub const MAPSERVER_WFS: &str = "http://maps.example/cgi-bin/mapserv?map=/srv/roads.map";
    pub const GWC_WMS: &str = "https://gwc.example/geoserver/gwc/service/wms";
    pub const WMS_WEB_MERCATOR: &str = "http://maps.example/wms?CRS=EPSG:3857";
}

/// Common record identifiers.
pub mod records {
    pub const LAYER1: &str = "ns:layer1";
    pub const ROADS: &str = "dpaw:roads";
    pub const FIRE_HISTORY: &str = "dpaw:fire_history";
}

/// Override table contents in the proj `epsg` file format.
pub mod crs_overrides {
    pub const MGA_ZONE_50: &str = "\
# GDA94 / MGA zone 50
<28350> +proj=utm +zone=50 +south +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs <>
";

    pub const MIXED: &str = "\
# comment lines and blanks are ignored

<28350> +proj=utm +zone=50 +south +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs <>
EPSG:4283 +proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs
this line is not a definition
";
}
