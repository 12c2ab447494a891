pub mod spheres;
pub mod billboard_map;
