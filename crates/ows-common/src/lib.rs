//! Common types shared across the catalogue OWS crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod link;
pub mod record;
pub mod tile;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{OwsError, OwsResult};
pub use link::{LinkKey, LinkList, LinkSchema, ServiceLink};
pub use record::Record;
pub use tile::{compute_tile, TileGrid};
