//! Tests for preview tile computation.

use approx::assert_relative_eq;
use ows_common::{compute_tile, BoundingBox, CrsCode, TileGrid};
use test_utils::{bbox, boxes_within};

fn from_tuple(t: (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(t.0, t.1, t.2, t.3)
}

/// True when `tile` is a cell of the power-of-two subdivision of `grid`.
fn is_grid_cell(grid: &BoundingBox, tile: &BoundingBox) -> bool {
    let min_side = grid.width().min(grid.height());
    let side = tile.width();
    if (side - tile.height()).abs() > 1e-9 * min_side {
        return false;
    }

    let ratio = min_side / side;
    let level = ratio.log2().round();
    if (2f64.powf(level) - ratio).abs() > 1e-9 * ratio {
        return false;
    }

    let col = (tile.min_x - grid.min_x) / side;
    let row = (tile.min_y - grid.min_y) / side;
    (col - col.round()).abs() < 1e-6 && (row - row.round()).abs() < 1e-6
}

#[test]
fn test_tiles_cover_generated_boxes_wgs84() {
    let grid = TileGrid::Wgs84.extent();
    for t in boxes_within(bbox::GLOBAL, 500, 1) {
        let target = from_tuple(t);
        let tile = compute_tile(&grid, &target, &target);
        assert!(tile.contains(&target), "{tile:?} does not contain {target:?}");
        if tile != target {
            assert!(is_grid_cell(&grid, &tile), "{tile:?} is not a grid cell");
        }
    }
}

#[test]
fn test_tiles_cover_generated_boxes_web_mercator() {
    let grid = TileGrid::WebMercator.extent();
    for t in boxes_within(bbox::WEB_MERCATOR_WORLD, 500, 2) {
        let target = from_tuple(t);
        let tile = compute_tile(&grid, &target, &target);
        assert!(tile.contains(&target));
        if tile != target {
            assert!(is_grid_cell(&grid, &tile));
        }
    }
}

#[test]
fn test_small_box_gets_small_tile() {
    let grid = TileGrid::Wgs84.extent();
    let target = from_tuple(bbox::PERTH_CBD);
    let tile = compute_tile(&grid, &target, &target);

    assert!(tile.contains(&target));
    assert!(is_grid_cell(&grid, &tile));
    assert!(tile.width() < 1.0);
}

#[test]
fn test_box_exceeding_grid_returns_fallback() {
    let grid = TileGrid::Wgs84.extent();
    let target = from_tuple(bbox::BEYOND_GRID);
    let fallback = from_tuple(bbox::AUSTRALIA);
    assert_eq!(compute_tile(&grid, &target, &fallback), fallback);
}

#[test]
fn test_whole_grid_returns_fallback() {
    // No single 180° cell holds the 360° wide world
    let grid = TileGrid::Wgs84.extent();
    let fallback = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(compute_tile(&grid, &grid, &fallback), fallback);
}

#[test]
fn test_degenerate_box_returns_fallback() {
    let grid = TileGrid::Wgs84.extent();
    let target = from_tuple(bbox::POINT);
    let fallback = from_tuple(bbox::PERTH_REGION);
    assert_eq!(compute_tile(&grid, &target, &fallback), fallback);
}

#[test]
fn test_nan_box_returns_fallback() {
    let grid = TileGrid::WebMercator.extent();
    let target = BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0);
    let fallback = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(compute_tile(&grid, &target, &fallback), fallback);
}

#[test]
fn test_root_cell_of_web_mercator() {
    let grid = TileGrid::WebMercator.extent();
    // Straddles the origin, so only the root cell holds it
    let target = BoundingBox::new(-1000.0, -1000.0, 1000.0, 1000.0);
    let tile = compute_tile(&grid, &target, &target);
    assert_eq!(tile, grid);
}

#[test]
fn test_quadrant_of_web_mercator() {
    let grid = TileGrid::WebMercator.extent();
    let target = BoundingBox::new(1000.0, 1000.0, 2000.0, 2000.0);
    let tile = compute_tile(&grid, &target, &target);

    assert!(tile.contains(&target));
    assert_relative_eq!(tile.min_x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(tile.min_y, 0.0, epsilon = 1e-6);
}

#[test]
fn test_preview_tile_helper() {
    let target = from_tuple(bbox::PERTH_REGION);
    assert_eq!(
        TileGrid::Wgs84.preview_tile(&target),
        BoundingBox::new(90.0, -45.0, 135.0, 0.0)
    );
}

#[test]
fn test_grid_crs() {
    assert_eq!(TileGrid::Wgs84.crs(), CrsCode::EPSG_4326);
    assert_eq!(TileGrid::for_crs(CrsCode::EPSG_3857).unwrap().crs(), CrsCode::EPSG_3857);
    assert!(TileGrid::for_crs(CrsCode::EPSG_4283).is_err());
}
