//! Sphere-floor and sphere-sphere collision response
//!
//! Both handlers first push the spheres out of penetration by exactly the
//! overlap, then exchange velocity, and finally store momentum as
//! `restitution * m * v`. The restitution factor scales momentum only; the
//! stored velocity stays the unscaled elastic result until the next
//! integration step rebuilds it from momentum.

use crate::simulation::states::{NVec3, Sphere};

/// Reference restitution factor
pub const RESTITUTION: f64 = 0.9;

/// Lift `sphere` out of the ground plane y = 0 and bounce it
/// Returns whether a contact happened
pub fn handle_floor_sphere_collision(sphere: &mut Sphere, restitution: f64) -> bool {
    let depth = sphere.radius - sphere.x.y;
    if depth < 0.0 {
        return false;
    }
    // resting exactly on the floor, lifted by the full penetration depth
    sphere.x.y = sphere.radius;

    let n = NVec3::new(0.0, -1.0, 0.0);
    sphere.v -= 2.0 * sphere.v.dot(&n) * n;
    sphere.p = restitution * sphere.m * sphere.v;
    true
}

/// Separate two touching spheres and apply a 1D elastic exchange along the
/// line of centres. Returns whether a contact happened.
pub fn handle_spheres_collision(a: &mut Sphere, b: &mut Sphere, restitution: f64) -> bool {
    let delta = a.x - b.x;
    let dist = delta.norm();
    let reach = a.radius + b.radius;
    if dist > reach {
        return false;
    }
    // coincident centres have no contact normal
    let Some(n) = delta.try_normalize(1e-12) else {
        return false;
    };

    let push = 0.5 * (reach - dist) * n;
    a.x += push;
    b.x -= push;

    // normal / tangential split
    let va_n = a.v.dot(&n) * n;
    let va_t = a.v - va_n;
    let vb_n = b.v.dot(&n) * n;
    let vb_t = b.v - vb_n;

    let (ma, mb) = (a.m, b.m);
    let total = ma + mb;
    a.v = va_n * ((ma - mb) / total) + vb_n * (2.0 * mb / total) + va_t;
    b.v = va_n * (2.0 * ma / total) + vb_n * ((mb - ma) / total) + vb_t;

    a.p = restitution * ma * a.v;
    b.p = restitution * mb * b.v;
    true
}

/// Two distinct mutable elements of a slice
/// `None` if the indices are equal or out of range
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i.max(j) >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

/// Collide sphere `i` against every other sphere of the set
/// Returns the number of contacts
pub fn collide_with_all(spheres: &mut [Sphere], i: usize, restitution: f64) -> usize {
    let mut contacts = 0;
    for j in 0..spheres.len() {
        let Some((a, b)) = pair_mut(spheres, i, j) else {
            continue;
        };
        if handle_spheres_collision(a, b, restitution) {
            contacts += 1;
        }
    }
    contacts
}
