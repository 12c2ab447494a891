//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`MeshConfig`]       – the closed triangle mesh to pack (boxes or raw vertices)
//! - [`PartitionConfig`]  – descending y thresholds that slice the mesh into bands
//! - [`PackingConfig`]    – lattice step, candidate radii and sphere mass
//! - [`BillboardConfig`]  – billboard cell size
//! - [`ParametersConfig`] – physical constants and dissolve tuning
//! - [`EngineConfig`]     – integrator choice
//! - [`ForceConfig`]      – force terms acting on released spheres
//! - [`BodyConfig`]       – placement of each simulated instance
//! - [`ViewerConfig`]     – viewer position and timed "shots" for the headless driver
//!
//! # YAML format
//!
//! ```yaml
//! mesh:
//!   kind: cuboids
//!   boxes:
//!     - { min: [-0.5, -0.5, -0.5], max: [0.5, 0.5, 0.5] }
//!
//! partition:
//!   thresholds: [1.0, 0.5, -0.2, -1.4]
//!
//! packing:
//!   grid_step: 0.15
//!   radii: [0.03, 0.02, 0.015]
//!   mass: 0.3
//!
//! billboards:
//!   size: 0.02
//!
//! parameters:
//!   t_end: 5.0              # headless run length
//!   h0: 0.004               # frame step
//!   max_dt: 0.004           # tick clamp
//!   g: 9.81
//!   restitution: 0.9
//!   energy_threshold: 0.2
//!   dissolve_speed: 2.5
//!   billboard_life: 700
//!   billboard_speed: 0.003
//!   approach_speed: 0.0
//!   reach_distance: 0.05
//!   seed: 42
//!
//! engine:
//!   integrator: "euler"     # or "semi_implicit"
//!
//! forces:
//!   - kind: gravity
//!
//! bodies:
//!   - position: [0.0, 0.51, 0.0]
//!
//! viewer:
//!   position: [0.0, 0.5, 10.0]
//!   shots:
//!     - { at: 0.0, h_angle: 3.14159, v_angle: 0.0 }
//! ```

use serde::Deserialize;

/// Which integrator advances released spheres
/// `integrator: "euler"` or `integrator: "semi_implicit"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Explicit Euler on (x, p), position uses the pre-step velocity
    Euler,

    #[serde(rename = "semi_implicit")] // Momentum first, then position with the updated velocity
    SemiImplicit,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig,
}

/// One axis-aligned box of a procedural mesh
#[derive(Deserialize, Debug, Clone)]
pub struct CuboidConfig {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// Source of the mesh to pack
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshConfig {
    /// Disjoint closed boxes
    Cuboids { boxes: Vec<CuboidConfig> },
    /// Flat triangle list, 3 vertices per triangle
    Vertices { vertices: Vec<[f64; 3]> },
}

#[derive(Deserialize, Debug, Clone)]
pub struct PartitionConfig {
    #[serde(default)]
    pub thresholds: Vec<f64>, // descending, n thresholds give n + 1 bands
}

#[derive(Deserialize, Debug, Clone)]
pub struct PackingConfig {
    pub grid_step: f64, // lattice spacing
    pub radii: Vec<f64>, // candidate radii, largest first
    pub mass: f64, // mass of every sphere
}

#[derive(Deserialize, Debug, Clone)]
pub struct BillboardConfig {
    pub size: f64, // cell side and quad scale
}

/// Global numerical and physical parameters for a scenario
/// Missing fields fall back to the reference tuning
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64, // headless run length
    pub h0: f64, // frame step
    pub max_dt: f64, // tick clamp
    pub g: f64, // gravity
    pub restitution: f64, // momentum scale after contacts
    pub energy_threshold: f64, // cull threshold
    pub dissolve_speed: f64, // fall rate of the dissolve front
    pub billboard_life: i32, // ticks per billboard
    pub billboard_speed: f64, // billboard drift per tick
    pub approach_speed: f64, // idle body approach per tick
    pub reach_distance: f64, // body-to-viewer distance that ends a run
    pub seed: u64, // deterministic seed to make runs reproducable
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = crate::simulation::params::Parameters::default();
        Self {
            t_end: p.t_end,
            h0: p.h0,
            max_dt: p.max_dt,
            g: p.g,
            restitution: p.restitution,
            energy_threshold: p.energy_threshold,
            dissolve_speed: p.dissolve_speed,
            billboard_life: p.billboard_life,
            billboard_speed: p.billboard_speed,
            approach_speed: p.approach_speed,
            reach_distance: p.reach_distance,
            seed: p.seed,
        }
    }
}

/// Force terms, evaluated per released sphere every tick
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceConfig {
    /// Uniform gravity using `parameters.g`
    Gravity,
    /// Linear drag `-k v`
    Drag { k: f64 },
}

/// Placement of one simulated instance of the mesh
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub position: [f64; 3], // world offset of the model
}

/// A click of the viewer at time `at`, looking along the given angles
#[derive(Deserialize, Debug, Clone)]
pub struct ShotConfig {
    pub at: f64,
    pub h_angle: f64,
    pub v_angle: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ViewerConfig {
    pub position: [f64; 3],
    #[serde(default)]
    pub shots: Vec<ShotConfig>,
}

fn default_engine() -> EngineConfig {
    EngineConfig { integrator: IntegratorConfig::Euler }
}

fn default_forces() -> Vec<ForceConfig> {
    vec![ForceConfig::Gravity]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub mesh: MeshConfig, // Mesh to pack
    #[serde(default = "default_partition")]
    pub partition: PartitionConfig, // Band thresholds
    pub packing: PackingConfig, // Sphere lattice
    pub billboards: BillboardConfig, // Billboard layout
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default = "default_engine")]
    pub engine: EngineConfig, // Integrator
    #[serde(default = "default_forces")]
    pub forces: Vec<ForceConfig>, // Force terms, gravity if omitted
    pub bodies: Vec<BodyConfig>, // Instances of the mesh
    pub viewer: ViewerConfig, // Viewer for the headless driver
}

fn default_partition() -> PartitionConfig {
    PartitionConfig { thresholds: Vec::new() }
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }
}
