//! Test data generators for bounding boxes.
//!
//! The generators are seeded so failures are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates `count` non-degenerate boxes strictly inside `extent`.
///
/// Box sizes span several orders of magnitude so that tiles at many
/// subdivision levels are exercised.
pub fn boxes_within(
    extent: (f64, f64, f64, f64),
    count: usize,
    seed: u64,
) -> Vec<(f64, f64, f64, f64)> {
    let (min_x, min_y, max_x, max_y) = extent;
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let scale = 10f64.powi(-((i % 6) as i32));
            let w = (max_x - min_x) * scale * rng.gen_range(0.01..0.5);
            let h = (max_y - min_y) * scale * rng.gen_range(0.01..0.5);
            let x = rng.gen_range(min_x..max_x - w);
            let y = rng.gen_range(min_y..max_y - h);
            (x, y, x + w, y + h)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_within_extent() {
        let extent = (-180.0, -90.0, 180.0, 90.0);
        let boxes = boxes_within(extent, 100, 7);
        assert_eq!(boxes.len(), 100);
        for (x0, y0, x1, y1) in boxes {
            assert!(x0 >= -180.0 && x1 <= 180.0 && x0 < x1);
            assert!(y0 >= -90.0 && y1 <= 90.0 && y0 < y1);
        }
    }

    #[test]
    fn test_deterministic() {
        let extent = (0.0, 0.0, 1.0, 1.0);
        assert_eq!(boxes_within(extent, 5, 42), boxes_within(extent, 5, 42));
    }
}
