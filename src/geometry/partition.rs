//! Horizontal partitioning of a mesh into y-band slabs
//!
//! Each `Partition` keeps:
//! - its axis-aligned extents (`min`, `max`)
//! - the triangles the inside/outside classifier needs for points in the slab
//! - the eight slab corners and the 12-triangle box shell built from them,
//!   which the target selector ray-casts against
//!
//! Band limits are computed per vertex, but triangles are collected per
//! triangle: a triangle joins a partition if any one of its vertices lies in
//! the partition's final y-range. The looser rule keeps triangles that
//! straddle a band boundary visible to both neighbours.

use tracing::{debug, warn};

use crate::error::{DisperseError, Result};
use crate::geometry::mesh::{box_corners, box_shell, Mesh};
use crate::simulation::states::NVec3;

/// Descending y thresholds; `n` thresholds describe `n + 1` bands
#[derive(Debug, Clone)]
pub struct BandTable {
    thresholds: Vec<f64>,
}

impl BandTable {
    pub fn new(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(DisperseError::InvalidConfig("band thresholds must be finite".into()));
        }
        if thresholds.windows(2).any(|w| w[0] <= w[1]) {
            return Err(DisperseError::InvalidConfig(format!(
                "band thresholds must be strictly descending, got {:?}",
                thresholds
            )));
        }
        Ok(Self { thresholds })
    }

    /// A single band covering the whole mesh
    pub fn single() -> Self {
        Self { thresholds: Vec::new() }
    }

    pub fn band_count(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Band a height belongs to: the first band whose threshold it exceeds,
    /// otherwise the bottom band
    pub fn band_of(&self, y: f64) -> usize {
        self.thresholds
            .iter()
            .position(|&t| y > t)
            .unwrap_or(self.thresholds.len())
    }
}

#[derive(Debug, Clone)]
pub struct Partition {
    pub min: NVec3,
    pub max: NVec3,
    pub triangles: Vec<NVec3>, // classifier triangles, flat list
    pub corners: [NVec3; 8],
    pub shell: Vec<NVec3>, // 36 vertices, targeting only
}

impl Partition {
    fn from_limits(min: NVec3, max: NVec3) -> Self {
        let corners = box_corners(&min, &max);
        let shell = box_shell(&corners);
        Self {
            min,
            max,
            triangles: Vec::new(),
            corners,
            shell,
        }
    }

    /// Copy every mesh triangle with at least one vertex inside `[min.y, max.y]`
    fn fill_triangles(&mut self, mesh: &Mesh) {
        let (lo, hi) = (self.min.y, self.max.y);
        for tri in mesh.triangles() {
            if tri.iter().any(|v| v.y >= lo && v.y <= hi) {
                self.triangles.extend_from_slice(tri);
            }
        }
    }

    pub fn extent(&self) -> NVec3 {
        self.max - self.min
    }

    /// Horizontal mid-point `(x, z)` of the slab
    pub fn horizontal_mid(&self) -> (f64, f64) {
        (0.5 * (self.min.x + self.max.x), 0.5 * (self.min.z + self.max.z))
    }

    pub fn mid_z(&self) -> f64 {
        0.5 * (self.min.z + self.max.z)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Slice `mesh` into one partition per non-empty band, top band first
pub fn build_partitions(mesh: &Mesh, bands: &BandTable) -> Vec<Partition> {
    let n = bands.band_count();
    let mut mins = vec![NVec3::repeat(f64::INFINITY); n];
    let mut maxs = vec![NVec3::repeat(f64::NEG_INFINITY); n];
    let mut counts = vec![0usize; n];

    // single classifying scan over every vertex
    for v in mesh.vertices() {
        let b = bands.band_of(v.y);
        mins[b] = mins[b].inf(v);
        maxs[b] = maxs[b].sup(v);
        counts[b] += 1;
    }

    let mut partitions = Vec::with_capacity(n);
    for b in 0..n {
        if counts[b] == 0 {
            warn!(band = b, "band holds no mesh vertices, skipping partition");
            continue;
        }
        let mut partition = Partition::from_limits(mins[b], maxs[b]);
        partition.fill_triangles(mesh);
        debug!(
            band = b,
            triangles = partition.triangle_count(),
            y_min = partition.min.y,
            y_max = partition.max.y,
            "partition built"
        );
        partitions.push(partition);
    }
    partitions
}

/// Lowest and highest y over all partitions
pub fn vertical_span(partitions: &[Partition]) -> Option<(f64, f64)> {
    let bottom = partitions.iter().map(|p| p.min.y).reduce(f64::min)?;
    let top = partitions.iter().map(|p| p.max.y).reduce(f64::max)?;
    Some((bottom, top))
}
