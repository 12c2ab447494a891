//! The simulation world and its per-tick driver
//!
//! `World` owns everything the core mutates: shared partition geometry, the
//! billboard layout, every body, tuning parameters, the force set, the clock
//! and the RNG. The external frame loop calls [`advance_simulation`] once per
//! frame and reads transforms and lifecycle states back out.
//!
//! Tick order, per body:
//! 1. idle bodies approach the viewer once any body has been triggered
//! 2. triggered bodies start dissolving; the dissolve front falls
//! 3. billboard rows passed by the front are released
//! 4. active billboards move, age, face the viewer and are pruned
//! 5. released spheres collide (floor, then every other sphere) and integrate
//!
//! then low-energy spheres are culled across all bodies and time advances.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{DisperseError, Result};
use crate::fitting::billboard_map::BillboardMap;
use crate::geometry::partition::{vertical_span, Partition};
use crate::simulation::billboards::BillboardGenerator;
use crate::simulation::collision::{collide_with_all, handle_floor_sphere_collision};
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{clamp_tick, integrate};
use crate::simulation::params::Parameters;
use crate::simulation::selection::select_target;
use crate::simulation::states::{Body, Lifecycle, NVec3, Sphere};

pub struct World {
    pub partitions: Vec<Partition>,
    pub billboard_map: BillboardMap,
    pub bodies: Vec<Body>,
    pub parameters: Parameters,
    pub engine: Engine,
    pub forces: ForceSet,
    pub t: f64,
    bottom: f64,
    top: f64,
    rng: StdRng,
}

/// Per-frame counts for logging and drivers
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub t: f64,
    pub spheres: usize,
    pub billboards: usize,
    pub lifecycles: Vec<Lifecycle>,
}

impl World {
    /// Assemble bodies from per-body packings (model-local) and placements
    pub fn new(
        partitions: Vec<Partition>,
        billboard_map: BillboardMap,
        packed: Vec<Vec<Sphere>>,
        placements: &[NVec3],
        parameters: Parameters,
        engine: Engine,
        forces: ForceSet,
    ) -> Result<Self> {
        let (bottom, top) = vertical_span(&partitions)
            .ok_or_else(|| DisperseError::InvalidConfig("mesh produced no partitions".into()))?;
        if packed.len() != placements.len() {
            return Err(DisperseError::InvalidConfig(format!(
                "{} sphere sets for {} body placements",
                packed.len(),
                placements.len()
            )));
        }
        if !(parameters.max_dt > 0.0) {
            return Err(DisperseError::InvalidConfig(format!(
                "max_dt must be positive, got {}",
                parameters.max_dt
            )));
        }

        let bodies = packed
            .into_iter()
            .zip(placements.iter())
            .enumerate()
            .map(|(i, (mut spheres, offset))| {
                for s in spheres.iter_mut() {
                    s.translate(offset);
                }
                let billboards = BillboardGenerator::new(&partitions, &billboard_map, parameters.billboard_life);
                Body::new(i, *offset, spheres, billboards, top)
            })
            .collect();

        let rng = StdRng::seed_from_u64(parameters.seed);

        Ok(Self {
            partitions,
            billboard_map,
            bodies,
            parameters,
            engine,
            forces,
            t: 0.0,
            bottom,
            top,
            rng,
        })
    }

    /// Model-local height where dissolving ends
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Model-local height where dissolving starts
    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Ray-cast from the viewer and trigger the nearest idle body hit
    pub fn select_target(&mut self, viewpoint: &NVec3, direction: &NVec3) -> Option<usize> {
        select_target(viewpoint, direction, &mut self.bodies, &self.partitions)
    }

    /// Trigger a body directly; false if out of range or no longer idle
    pub fn trigger(&mut self, index: usize) -> bool {
        match self.bodies.get_mut(index) {
            Some(body) if body.lifecycle() == Lifecycle::Idle => body.advance_to(Lifecycle::Triggered),
            _ => false,
        }
    }

    /// True once a body that is not retired has come within reach of the viewer
    pub fn viewer_reached(&self, viewpoint: &NVec3) -> bool {
        self.bodies
            .iter()
            .filter(|b| !b.is_retired())
            .any(|b| (b.position - viewpoint).norm() < self.parameters.reach_distance)
    }

    pub fn sphere_count(&self) -> usize {
        self.bodies.iter().map(|b| b.spheres.len()).sum()
    }

    pub fn frame_summary(&self) -> FrameSummary {
        FrameSummary {
            t: self.t,
            spheres: self.sphere_count(),
            billboards: self.bodies.iter().map(|b| b.billboards.active_count()).sum(),
            lifecycles: self.bodies.iter().map(Body::lifecycle).collect(),
        }
    }

    /// Remove spheres whose potential plus kinetic energy fell below threshold
    /// Returns how many were removed
    pub fn cull_spheres(&mut self) -> usize {
        let g = self.parameters.g;
        let threshold = self.parameters.energy_threshold;
        let mut removed = 0;
        for body in self.bodies.iter_mut() {
            let before = body.spheres.len();
            body.spheres.retain(|s| s.mechanical_energy(g) >= threshold);
            removed += before - body.spheres.len();
        }
        removed
    }
}

/// Advance the world by one frame of `elapsed` seconds (clamped to `max_dt`)
/// with the viewer at `viewpoint`. Returns the tick length used.
pub fn advance_simulation(world: &mut World, elapsed: f64, viewpoint: &NVec3) -> f64 {
    let dt = clamp_tick(elapsed, world.parameters.max_dt);

    let World {
        bodies,
        billboard_map,
        parameters,
        engine,
        forces,
        t,
        bottom,
        rng,
        ..
    } = world;

    let started = bodies.iter().any(Body::is_triggered);

    for body in bodies.iter_mut() {
        if body.lifecycle() == Lifecycle::Idle {
            if started && parameters.approach_speed > 0.0 {
                if let Some(dir) = (viewpoint - body.position).try_normalize(1e-12) {
                    body.translate(&(dir * parameters.approach_speed));
                }
            }
            continue;
        }

        if body.advance_to(Lifecycle::Dissolving) {
            info!(body = body.index, t = *t, "dissolve started");
        }

        if body.is_dissolving() {
            body.dissolve_level -= parameters.dissolve_speed * dt;
            if body.dissolve_level <= *bottom {
                body.dissolve_level = *bottom;
                body.advance_to(Lifecycle::Retired);
                info!(body = body.index, t = *t, "body fully dissolved");
            }
        }

        // release rows before they are advanced this tick
        while body.next_row < billboard_map.row_levels.len()
            && body.dissolve_level <= billboard_map.row_levels[body.next_row]
        {
            body.billboards.activate_row(body.next_row, parameters.billboard_speed, rng);
            body.next_row += 1;
        }

        body.billboards.update(&body.position, viewpoint);
        body.billboards.prune();

        let mut contacts = 0;
        for i in 0..body.spheres.len() {
            if !body.is_released(&body.spheres[i]) {
                continue;
            }
            handle_floor_sphere_collision(&mut body.spheres[i], parameters.restitution);
            contacts += collide_with_all(&mut body.spheres, i, parameters.restitution);
            integrate(&mut body.spheres[i], forces, &engine.integrator, *t, dt);
        }
        debug!(body = body.index, contacts, level = body.dissolve_level, "body advanced");
    }

    world.cull_spheres();
    world.t += dt;
    dt
}
