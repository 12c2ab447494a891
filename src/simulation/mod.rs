pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod collision;
pub mod billboards;
pub mod selection;
pub mod world;
pub mod scenario;
