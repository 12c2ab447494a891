//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - the `World` (partitions, billboard layout, bodies with their packed spheres)
//! - numerical parameters (`Parameters`) and engine settings (`Engine`)
//! - the active force set (`ForceSet`)
//! - the viewer position and its scheduled shots for the headless driver

use tracing::info;

use crate::configuration::config::{ForceConfig, MeshConfig, ScenarioConfig, ShotConfig};
use crate::error::Result;
use crate::fitting::billboard_map::build_billboard_map;
use crate::fitting::spheres::pack_spheres;
use crate::geometry::mesh::Mesh;
use crate::geometry::partition::{build_partitions, BandTable};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, Gravity, LinearDrag};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;
use crate::simulation::world::World;

/// Runtime bundle constructed from a [`ScenarioConfig`]
pub struct Scenario {
    pub world: World,
    pub viewpoint: NVec3,
    pub shots: Vec<ShotConfig>, // sorted by time
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Mesh: boxes or raw vertices -> triangle list
        let mesh = build_mesh(&cfg.mesh)?;

        // Partitions from the band table
        let bands = BandTable::new(cfg.partition.thresholds.clone())?;
        let partitions = build_partitions(&mesh, &bands);

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            max_dt: p_cfg.max_dt,
            g: p_cfg.g,
            restitution: p_cfg.restitution,
            energy_threshold: p_cfg.energy_threshold,
            dissolve_speed: p_cfg.dissolve_speed,
            billboard_life: p_cfg.billboard_life,
            billboard_speed: p_cfg.billboard_speed,
            approach_speed: p_cfg.approach_speed,
            reach_distance: p_cfg.reach_distance,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: cfg.engine.integrator,
        };

        // Forces: map each configured term onto the force set
        let forces = cfg.forces.iter().fold(ForceSet::new(), |set, f| match f {
            ForceConfig::Gravity => set.with(Gravity { g: parameters.g }),
            ForceConfig::Drag { k } => set.with(LinearDrag { k: *k }),
        });

        // Static layouts: sphere packing and billboard map
        let placements: Vec<NVec3> = cfg.bodies.iter().map(|b| NVec3::from(b.position)).collect();
        let packed = pack_spheres(
            &partitions,
            cfg.packing.grid_step,
            &cfg.packing.radii,
            cfg.packing.mass,
            placements.len(),
        )?;
        let billboard_map = build_billboard_map(&partitions, cfg.billboards.size)?;

        let world = World::new(partitions, billboard_map, packed, &placements, parameters, engine, forces)?;

        let mut shots = cfg.viewer.shots;
        shots.sort_by(|a, b| a.at.total_cmp(&b.at));

        info!(
            triangles = mesh.triangle_count(),
            partitions = world.partitions.len(),
            bodies = world.bodies.len(),
            spheres_per_body = world.bodies.first().map_or(0, |b| b.spheres.len()),
            "scenario built"
        );

        Ok(Self {
            world,
            viewpoint: NVec3::from(cfg.viewer.position),
            shots,
        })
    }
}

pub fn build_mesh(cfg: &MeshConfig) -> Result<Mesh> {
    match cfg {
        MeshConfig::Cuboids { boxes } => {
            let boxes: Vec<(NVec3, NVec3)> = boxes
                .iter()
                .map(|b| (NVec3::from(b.min), NVec3::from(b.max)))
                .collect();
            Mesh::from_cuboids(&boxes)
        }
        MeshConfig::Vertices { vertices } => Mesh::from_vertices(vertices.iter().map(|v| NVec3::from(*v)).collect()),
    }
}
