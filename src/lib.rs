pub mod error;
pub mod geometry;
pub mod fitting;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{DisperseError, Result};

pub use geometry::mesh::Mesh;
pub use geometry::classifier::{ray_triangle_hit, point_in_solid, sphere_inside_solid};
pub use geometry::partition::{build_partitions, BandTable, Partition};

pub use fitting::spheres::pack_spheres;
pub use fitting::billboard_map::{build_billboard_map, BillboardMap};

pub use simulation::states::{Body, Lifecycle, Sphere, NVec3};
pub use simulation::forces::{ForceSet, ForceTerm, Gravity, LinearDrag};
pub use simulation::collision::{handle_floor_sphere_collision, handle_spheres_collision};
pub use simulation::billboards::{Billboard, BillboardGenerator};
pub use simulation::selection::{select_target, view_direction};
pub use simulation::world::{advance_simulation, FrameSummary, World};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, MeshConfig, PackingConfig, ParametersConfig, IntegratorConfig};

pub use benchmark::benchmark::{bench_classifier, bench_packing, bench_collisions_curve};
