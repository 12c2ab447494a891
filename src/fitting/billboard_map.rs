//! Billboard occupancy map
//!
//! Each partition is cut at its mid-z plane and sampled on a square grid of
//! side `size`, top row first. A cell is occupied when its center classifies
//! inside the solid. Every grid row also records the height at which the
//! dissolve front releases it; rows of all partitions are concatenated top to
//! bottom, so row `r` of the map is row `r` of every generator built from it.

use tracing::info;

use crate::error::{DisperseError, Result};
use crate::geometry::classifier::point_in_solid;
use crate::geometry::partition::Partition;
use crate::simulation::states::NVec3;

/// Occupancy of one partition's mid-z slice, row-major, top row first
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[derive(Debug, Clone)]
pub struct BillboardMap {
    pub size: f64,
    pub grids: Vec<OccupancyGrid>, // one per partition
    pub row_levels: Vec<f64>, // release height per global row, descending
}

impl BillboardMap {
    pub fn row_count(&self) -> usize {
        self.row_levels.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.grids.iter().map(OccupancyGrid::occupied_count).sum()
    }
}

/// Number of cells of side `size` needed to cover `range`
pub fn cell_count(range: f64, size: f64) -> usize {
    ((range / size) - 1e-9).ceil().max(0.0) as usize
}

/// Center of cell `(row, col)` on the mid-z slice of `partition`
pub fn cell_center(partition: &Partition, row: usize, col: usize, size: f64) -> NVec3 {
    let half = 0.5 * size;
    NVec3::new(
        partition.min.x + col as f64 * size + half,
        partition.max.y - row as f64 * size - half,
        partition.mid_z(),
    )
}

pub fn build_billboard_map(partitions: &[Partition], size: f64) -> Result<BillboardMap> {
    if !(size > 0.0) {
        return Err(DisperseError::InvalidConfig(format!("billboard size must be positive, got {size}")));
    }

    let mut grids = Vec::with_capacity(partitions.len());
    let mut row_levels = Vec::new();

    for partition in partitions {
        let extent = partition.extent();
        let rows = cell_count(extent.y, size);
        let cols = cell_count(extent.x, size);
        let mut cells = Vec::with_capacity(rows * cols);

        for j in 0..rows {
            row_levels.push(partition.max.y - j as f64 * size);
            for k in 0..cols {
                let center = cell_center(partition, j, k, size);
                cells.push(point_in_solid(&center, &partition.triangles));
            }
        }
        grids.push(OccupancyGrid { rows, cols, cells });
    }

    let map = BillboardMap { size, grids, row_levels };
    info!(rows = map.row_count(), occupied = map.occupied_count(), "billboard map built");
    Ok(map)
}
