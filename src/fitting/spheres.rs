//! Greedy multi-resolution sphere packing
//!
//! Every partition is swept on a regular lattice of spacing `grid_step`.
//! At each lattice node the candidate radii are tried largest first and the
//! first one whose sphere tests fully inside the solid is kept; the node is
//! then done. Nodes where nothing fits are skipped silently.

use tracing::info;

use crate::error::{DisperseError, Result};
use crate::geometry::classifier::sphere_inside_solid;
use crate::geometry::partition::Partition;
use crate::simulation::states::{NVec3, Sphere};

/// Horizontal launch speed away from the partition's mid-point
const LATERAL_SPEED: f64 = 0.5;
/// Upward launch speed
const VERTICAL_SPEED: f64 = 1.0;

/// Validated packing inputs
#[derive(Debug, Clone)]
pub struct PackingPlan {
    pub grid_step: f64,
    pub radii: Vec<f64>, // strictly descending
    pub mass: f64,
}

impl PackingPlan {
    pub fn new(grid_step: f64, radii: Vec<f64>, mass: f64) -> Result<Self> {
        if !(grid_step > 0.0) {
            return Err(DisperseError::InvalidConfig(format!("grid step must be positive, got {grid_step}")));
        }
        if radii.is_empty() {
            return Err(DisperseError::InvalidConfig("at least one candidate radius is required".into()));
        }
        if radii.iter().any(|&r| !(r > 0.0)) {
            return Err(DisperseError::InvalidConfig(format!("radii must be positive, got {:?}", radii)));
        }
        if radii.windows(2).any(|w| w[0] <= w[1]) {
            return Err(DisperseError::InvalidConfig(format!(
                "radii must be strictly descending, got {:?}",
                radii
            )));
        }
        if !(mass > 0.0) {
            return Err(DisperseError::InvalidConfig(format!("sphere mass must be positive, got {mass}")));
        }
        Ok(Self { grid_step, radii, mass })
    }
}

/// Lattice coordinates `min + k * step` (k >= 1) strictly below `max`
pub fn lattice_axis(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    (1u64..)
        .map(move |k| min + k as f64 * step)
        .take_while(move |&c| c < max)
}

/// Largest candidate radius that fits at `center`, if any
pub fn fit_radius(center: &NVec3, radii: &[f64], triangles: &[NVec3]) -> Option<f64> {
    radii
        .iter()
        .copied()
        .find(|&r| sphere_inside_solid(center, r, triangles))
}

/// Launch velocity pointing away from the partition's horizontal mid-point
pub fn launch_velocity(center: &NVec3, partition: &Partition) -> NVec3 {
    let (x_mid, z_mid) = partition.horizontal_mid();
    let vx = if center.x > x_mid { LATERAL_SPEED } else { -LATERAL_SPEED };
    let vz = if center.z > z_mid { LATERAL_SPEED } else { -LATERAL_SPEED };
    NVec3::new(vx, VERTICAL_SPEED, vz)
}

/// Pack one partition, model-local coordinates
pub fn pack_partition(partition: &Partition, plan: &PackingPlan) -> Vec<Sphere> {
    let mut spheres = Vec::new();
    for x in lattice_axis(partition.min.x, partition.max.x, plan.grid_step) {
        for y in lattice_axis(partition.min.y, partition.max.y, plan.grid_step) {
            for z in lattice_axis(partition.min.z, partition.max.z, plan.grid_step) {
                let center = NVec3::new(x, y, z);
                if let Some(r) = fit_radius(&center, &plan.radii, &partition.triangles) {
                    spheres.push(Sphere::new(center, launch_velocity(&center, partition), r, plan.mass));
                }
            }
        }
    }
    spheres
}

/// Pack every partition and hand each of `body_count` bodies its own copy
pub fn pack_spheres(
    partitions: &[Partition],
    grid_step: f64,
    radii: &[f64],
    mass: f64,
    body_count: usize,
) -> Result<Vec<Vec<Sphere>>> {
    let plan = PackingPlan::new(grid_step, radii.to_vec(), mass)?;

    let packed: Vec<Sphere> = partitions
        .iter()
        .flat_map(|p| pack_partition(p, &plan))
        .collect();

    info!(spheres = packed.len(), bodies = body_count, "sphere packing done");
    Ok(vec![packed; body_count])
}
