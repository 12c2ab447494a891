//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - frame step and run length for the headless driver (`h0`, `t_end`),
//! - the tick clamp `max_dt`,
//! - gravity, restitution and the energy cull threshold,
//! - dissolve, billboard and approach tuning,
//! - the deterministic seed for billboard jitter

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // frame step
    pub max_dt: f64, // upper bound of one tick
    pub g: f64, // gravity
    pub restitution: f64, // momentum scale after a contact
    pub energy_threshold: f64, // spheres below this mechanical energy are culled
    pub dissolve_speed: f64, // fall rate of the dissolve front
    pub billboard_life: i32, // ticks a released billboard lives
    pub billboard_speed: f64, // billboard drift per tick
    pub approach_speed: f64, // idle body approach per tick, 0 disables
    pub reach_distance: f64, // body-to-viewer distance that ends a run
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            t_end: 10.0,
            h0: 0.004,
            max_dt: 0.004,
            g: crate::simulation::forces::G_EARTH,
            restitution: crate::simulation::collision::RESTITUTION,
            energy_threshold: 0.2,
            dissolve_speed: 2.5,
            billboard_life: 700,
            billboard_speed: 0.003,
            approach_speed: 0.0,
            reach_distance: 0.05,
            seed: 42,
        }
    }
}
