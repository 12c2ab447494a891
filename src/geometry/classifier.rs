//! Ray/triangle intersection and the odd-crossing point-in-solid test
//!
//! The same Möller–Trumbore predicate serves two callers:
//! - the inside/outside classifier, which always casts along
//!   [`SOLID_RAY_DIRECTION`] and counts crossings
//! - the target selector, which casts along an arbitrary view direction
//!
//! Everything here is pure. Degenerate input (parallel rays, zero-length
//! directions, sliver triangles) reports "no intersection".

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::simulation::states::NVec3;

/// Determinant / distance tolerance of the intersection test
pub const EPSILON: f64 = 1e-7;

/// Fixed classifier direction: +Z with a small off-axis tilt.
///
/// Lattice points often sit exactly on the diagonal shared by the two
/// triangles of a quad face; a purely axial ray through such a point would be
/// counted twice.
pub const SOLID_RAY_DIRECTION: [f64; 3] = [1.23e-4, 4.57e-4, 1.0];

pub fn solid_ray_direction() -> NVec3 {
    NVec3::from(SOLID_RAY_DIRECTION).normalize()
}

/// Parametric distance `t` along `direction` at which the ray from `origin`
/// crosses triangle `(v0, v1, v2)`, or `None` if it misses.
pub fn ray_triangle_distance(origin: &NVec3, direction: &NVec3, v0: &NVec3, v1: &NVec3, v2: &NVec3) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // parallel to the triangle plane, or zero-length direction
    if a > -EPSILON && a < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Möller–Trumbore ray/triangle predicate
pub fn ray_triangle_hit(origin: &NVec3, direction: &NVec3, v0: &NVec3, v1: &NVec3, v2: &NVec3) -> bool {
    ray_triangle_distance(origin, direction, v0, v1, v2).is_some()
}

/// Odd-crossing test of `point` against a flat triangle list
///
/// Correct only for closed, non self-intersecting geometry along the ray.
pub fn point_in_solid(point: &NVec3, triangles: &[NVec3]) -> bool {
    let dir = solid_ray_direction();
    let crossings = triangles
        .chunks_exact(3)
        .filter(|tri| ray_triangle_hit(point, &dir, &tri[0], &tri[1], &tri[2]))
        .count();
    crossings % 2 == 1
}

/// The six axis-aligned boundary points of a sphere
pub fn sphere_probe_points(center: &NVec3, radius: f64) -> [NVec3; 6] {
    [
        center + NVec3::new(0.0, radius, 0.0),
        center + NVec3::new(0.0, -radius, 0.0),
        center + NVec3::new(0.0, 0.0, radius),
        center + NVec3::new(0.0, 0.0, -radius),
        center + NVec3::new(radius, 0.0, 0.0),
        center + NVec3::new(-radius, 0.0, 0.0),
    ]
}

/// True iff all six probe points of the sphere classify inside the solid
pub fn sphere_inside_solid(center: &NVec3, radius: f64, triangles: &[NVec3]) -> bool {
    let probes = sphere_probe_points(center, radius);

    #[cfg(feature = "parallel")]
    let inside = probes.par_iter().all(|p| point_in_solid(p, triangles));

    #[cfg(not(feature = "parallel"))]
    let inside = probes.iter().all(|p| point_in_solid(p, triangles));

    inside
}
