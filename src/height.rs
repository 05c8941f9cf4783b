//! Height maps: sparse grids of non-negative brightness values.

use std::collections::HashMap;

/// Sparse map from grid coordinates to non-negative heights.
///
/// Keys need not cover a full rectangle: absent coordinates are skipped on
/// encode and come back as 0 on decode.
pub type HeightMap = HashMap<(usize, usize), f64>;

/// Grid size implied by a height map: `(max x + 1, max y + 1)` over its keys.
///
/// Returns `(0, 0)` for an empty map.
pub fn grid_size(height: &HeightMap) -> (usize, usize) {
    let mut lx = 0;
    let mut ly = 0;
    for &(x, y) in height.keys() {
        lx = lx.max(x + 1);
        ly = ly.max(y + 1);
    }
    (lx, ly)
}

/// True when the map holds no strictly positive height.
pub fn is_all_zero(height: &HeightMap) -> bool {
    height.values().all(|&h| h == 0.0)
}
