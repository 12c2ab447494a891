pub mod mesh;
pub mod classifier;
pub mod partition;
