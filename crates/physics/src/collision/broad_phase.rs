//! Broad-phase collision detection using spatial partitioning

use std::collections::HashMap;

use super::WorldCapsule;

/// Uniform hash grid over world space
pub(crate) struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: HashMap::new(),
        }
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size.max(f32::EPSILON);
    }

    /// Rebuild the grid from this step's capsules
    pub fn rebuild(&mut self, capsules: &[WorldCapsule]) {
        self.cells.clear();

        for (index, capsule) in capsules.iter().enumerate() {
            let (min, max) = capsule.bounds();
            let (min_x, min_y) = self.cell_of(min.x, min.y);
            let (max_x, max_y) = self.cell_of(max.x, max.y);
            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    self.cells.entry((x, y)).or_default().push(index);
                }
            }
        }
    }

    /// Capsule index pairs sharing at least one cell, sorted and deduplicated
    /// so the solver visits contacts in a stable order.
    pub fn candidate_pairs(&self, capsules: &[WorldCapsule]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for cell in self.cells.values() {
            for (offset, &first) in cell.iter().enumerate() {
                for &second in &cell[offset + 1..] {
                    let (a, b) = (&capsules[first], &capsules[second]);
                    if a.body == b.body || !(a.dynamic || b.dynamic) {
                        continue;
                    }
                    pairs.push((first.min(second), first.max(second)));
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }
}
