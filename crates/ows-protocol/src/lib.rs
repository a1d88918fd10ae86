//! OGC link generation for catalogue records.
//!
//! Supports:
//! - WMS GetMap links (1.1.x and 1.3.0 CRS parameter naming)
//! - WFS GetFeature links (1.0.0, 1.1.0 and 2.0.0 syntax)
//! - GeoWebCache previews through WMS with tile-aligned extents
//! - Links to uploaded SLD, QML and LYR styles

pub mod builder;
pub mod endpoint;
pub mod params;
pub mod service;
pub mod style;

pub use builder::{LinkRequest, OwsLinkBuilder};
pub use endpoint::{Endpoint, QueryParam};
pub use params::{RequestParam, RequestParams};
pub use service::{normalize_version, ServiceType};
pub use style::{validate_default_styles, Style, StyleFormat};
