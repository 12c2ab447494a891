//! Ray-cast target selection
//!
//! Casts the viewer's ray at the box shells of every idle body's partitions
//! (displaced by the body's placement) and triggers the nearest body hit.

use tracing::info;

use crate::geometry::classifier::ray_triangle_hit;
use crate::geometry::partition::Partition;
use crate::simulation::states::{Body, Lifecycle, NVec3};

/// Unit view direction from horizontal / vertical look angles (radians)
pub fn view_direction(h_angle: f64, v_angle: f64) -> NVec3 {
    NVec3::new(
        v_angle.cos() * h_angle.sin(),
        v_angle.sin(),
        v_angle.cos() * h_angle.cos(),
    )
}

/// Distance from `viewpoint` to the first shell triangle of `partition` hit
/// by the ray, measured to that triangle's first vertex
fn first_shell_hit(viewpoint: &NVec3, direction: &NVec3, partition: &Partition, offset: &NVec3) -> Option<f64> {
    partition.shell.chunks_exact(3).find_map(|tri| {
        let (v0, v1, v2) = (tri[0] + offset, tri[1] + offset, tri[2] + offset);
        ray_triangle_hit(viewpoint, direction, &v0, &v1, &v2).then(|| (v0 - viewpoint).norm())
    })
}

/// Trigger the nearest idle body hit by the ray; returns its index
pub fn select_target(viewpoint: &NVec3, direction: &NVec3, bodies: &mut [Body], partitions: &[Partition]) -> Option<usize> {
    let mut nearest: Option<(usize, f64)> = None;

    for (i, body) in bodies.iter().enumerate() {
        if body.lifecycle() != Lifecycle::Idle {
            continue;
        }
        for partition in partitions {
            if let Some(dist) = first_shell_hit(viewpoint, direction, partition, &body.position) {
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((i, dist));
                }
            }
        }
    }

    let (index, dist) = nearest?;
    bodies[index].advance_to(Lifecycle::Triggered);
    info!(body = index, distance = dist, "body targeted");
    Some(index)
}
