//! Coordinate reprojection for catalogue bounding boxes.
//!
//! Definitions come from an override table first and the bundled EPSG
//! database second; the math is done by proj4rs.

pub mod error;
pub mod overrides;
pub mod reproject;

pub use error::ProjectionError;
pub use overrides::CrsOverrides;
pub use reproject::Reprojector;
