//! Preview tile computation.
//!
//! A layer preview is requested for a tile of a fixed binary subdivision of
//! the grid's full extent rather than for the layer's exact extent, so the
//! same preview URL is produced (and cached by GeoWebCache) for every layer
//! that falls into the same cell.

use crate::{BoundingBox, CrsCode, OwsError, OwsResult};
use serde::{Deserialize, Serialize};

/// Half the circumference of the Web Mercator sphere, rounded the way
/// GeoWebCache declares its EPSG:900913 gridset.
const WEB_MERCATOR_EXTENT: f64 = 20037508.34;

/// A tiling scheme known to GeoWebCache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileGrid {
    /// EPSG:4326, two 180° root cells side by side
    Wgs84,
    /// EPSG:3857, a single square root cell
    WebMercator,
}

impl TileGrid {
    /// Pick the grid for a CRS. Only the two gridsets GeoWebCache ships with are supported.
    pub fn for_crs(crs: CrsCode) -> OwsResult<Self> {
        match crs.canonical() {
            CrsCode::EPSG_4326 => Ok(TileGrid::Wgs84),
            CrsCode::EPSG_3857 => Ok(TileGrid::WebMercator),
            _ => Err(OwsError::UnsupportedTileCrs(crs.to_string())),
        }
    }

    /// CRS of the grid.
    pub fn crs(&self) -> CrsCode {
        match self {
            TileGrid::Wgs84 => CrsCode::EPSG_4326,
            TileGrid::WebMercator => CrsCode::EPSG_3857,
        }
    }

    /// Full extent of the grid.
    pub fn extent(&self) -> BoundingBox {
        match self {
            TileGrid::Wgs84 => BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
            TileGrid::WebMercator => BoundingBox::new(
                -WEB_MERCATOR_EXTENT,
                -WEB_MERCATOR_EXTENT,
                WEB_MERCATOR_EXTENT,
                WEB_MERCATOR_EXTENT,
            ),
        }
    }

    /// Smallest grid tile containing `target`, or `target` itself if none does.
    pub fn preview_tile(&self, target: &BoundingBox) -> BoundingBox {
        compute_tile(&self.extent(), target, target)
    }
}

/// Deepest subdivision level whose square cells are still at least `tile_side` wide.
fn max_level(min_side: f64, tile_side: f64) -> u32 {
    let mut times = (min_side / tile_side).floor() as u64;
    let mut level = 0;
    while times >= 2 {
        times /= 2;
        level += 1;
    }
    level
}

/// Compute the smallest power-of-two tile of `grid_extent` that fully contains `target`.
///
/// Cells are squares whose side is the shorter side of the grid halved
/// `level` times, laid out from the grid's lower-left corner. The search
/// starts at the deepest level whose cells can still fit the target and walks
/// towards the root. `fallback` is returned unchanged when the target is
/// degenerate, lies outside the grid, or straddles cell boundaries at every
/// level.
pub fn compute_tile(
    grid_extent: &BoundingBox,
    target: &BoundingBox,
    fallback: &BoundingBox,
) -> BoundingBox {
    let min_side = grid_extent.width().min(grid_extent.height());
    let tile_side = target.width().max(target.height());

    if !target.is_finite() || !(tile_side > 0.0) || !(min_side > 0.0) {
        return *fallback;
    }
    if !grid_extent.contains(target) {
        return *fallback;
    }

    for level in (0..=max_level(min_side, tile_side)).rev() {
        let distance_per_tile = min_side / 2f64.powi(level as i32);
        let col = ((target.min_x - grid_extent.min_x) / distance_per_tile).floor();
        let row = ((target.min_y - grid_extent.min_y) / distance_per_tile).floor();

        let min_x = grid_extent.min_x + col * distance_per_tile;
        let min_y = grid_extent.min_y + row * distance_per_tile;
        let tile = BoundingBox::new(
            min_x,
            min_y,
            min_x + distance_per_tile,
            min_y + distance_per_tile,
        );

        if tile.contains(target) && grid_extent.contains(&tile) {
            return tile;
        }
    }

    *fallback
}
