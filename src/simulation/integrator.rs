//! Fixed-step time integration for single spheres
//!
//! The state of a sphere is `(x, p)`; velocity is derived as `p / m` after
//! every step. Collisions write both `v` and a scaled `p`, so the velocity a
//! sphere carries into the next tick is the one reconstructed from momentum.

use crate::configuration::config::IntegratorConfig;
use crate::simulation::forces::ForceSet;
use crate::simulation::states::Sphere;

/// Explicit Euler: x_n+1 = x_n + dt v_n, p_n+1 = p_n + dt F_n, v_n+1 = p_n+1 / m
pub fn euler_step(sphere: &mut Sphere, forces: &ForceSet, t: f64, dt: f64) {
    let f = forces.total_force(t, sphere);
    sphere.x += dt * sphere.v;
    sphere.p += dt * f;
    sphere.v = sphere.p / sphere.m;
}

/// Semi-implicit Euler: momentum first, then position with the new velocity
pub fn semi_implicit_step(sphere: &mut Sphere, forces: &ForceSet, t: f64, dt: f64) {
    let f = forces.total_force(t, sphere);
    sphere.p += dt * f;
    sphere.v = sphere.p / sphere.m;
    sphere.x += dt * sphere.v;
}

/// Advance one sphere with the configured scheme
pub fn integrate(sphere: &mut Sphere, forces: &ForceSet, integrator: &IntegratorConfig, t: f64, dt: f64) {
    match integrator {
        IntegratorConfig::Euler => euler_step(sphere, forces, t, dt),
        IntegratorConfig::SemiImplicit => semi_implicit_step(sphere, forces, t, dt),
    }
}

/// Frame time clamped to the largest tick the simulation accepts
pub fn clamp_tick(elapsed: f64, max_dt: f64) -> f64 {
    elapsed.clamp(0.0, max_dt)
}
