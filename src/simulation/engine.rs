//! High-level runtime engine settings
//!
//! Selects the sphere integrator used when advancing a `World`

use crate::configuration::config::IntegratorConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or semi_implicit
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Euler,
        }
    }
}
