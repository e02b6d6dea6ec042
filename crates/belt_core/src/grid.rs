use smallvec::SmallVec;

use crate::types::{Cell, Rules};

pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn in_bounds(rules: &Rules, cell: Cell) -> bool {
    cell.x >= 0 && cell.x < rules.grid_width && cell.y >= 0 && cell.y < rules.grid_height
}

/// 4-directional neighbours, bounds not checked.
pub(crate) fn neighbors(cell: Cell) -> SmallVec<[Cell; 4]> {
    SmallVec::from_buf([
        Cell::new(cell.x - 1, cell.y),
        Cell::new(cell.x + 1, cell.y),
        Cell::new(cell.x, cell.y - 1),
        Cell::new(cell.x, cell.y + 1),
    ])
}

/// All cells within Manhattan distance `radius` of `center`, bounds not
/// checked. `radius` 0 yields just the center.
pub(crate) fn diamond(center: Cell, radius: i32) -> Vec<Cell> {
    let mut cells = Vec::new();
    for dx in -radius..=radius {
        let rem = radius - dx.abs();
        for dy in -rem..=rem {
            cells.push(Cell::new(center.x + dx, center.y + dy));
        }
    }
    cells
}
