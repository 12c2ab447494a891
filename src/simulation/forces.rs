//! Force contributors for the sphere simulation
//!
//! A forcing function is data: each term is a small struct implementing
//! [`ForceTerm`], evaluated with the simulation time and the sphere it acts
//! on. Terms are summed by a [`ForceSet`]. The default set is gravity only.

use crate::simulation::states::{NVec3, Sphere};

/// Standard gravity used by the reference tuning
pub const G_EARTH: f64 = 9.81;

/// Collection of force terms (gravity, drag, etc)
/// Contributions of all terms are summed into one force vector per sphere
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Gravity alone
    pub fn gravity(g: f64) -> Self {
        Self::new().with(Gravity { g })
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceTerm + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total force on `sphere` at time `t`
    pub fn total_force(&self, t: f64, sphere: &Sphere) -> NVec3 {
        self.terms
            .iter()
            .fold(NVec3::zeros(), |acc, term| acc + term.force(t, sphere))
    }
}

/// Trait for force sources acting on a single [`Sphere`]
pub trait ForceTerm {
    fn force(&self, t: f64, sphere: &Sphere) -> NVec3;
}

/// Uniform gravity along -y
pub struct Gravity {
    pub g: f64,
}

impl ForceTerm for Gravity {
    fn force(&self, _t: f64, sphere: &Sphere) -> NVec3 {
        NVec3::new(0.0, -sphere.m * self.g, 0.0)
    }
}

/// Linear air drag opposing velocity
pub struct LinearDrag {
    pub k: f64,
}

impl ForceTerm for LinearDrag {
    fn force(&self, _t: f64, sphere: &Sphere) -> NVec3 {
        -self.k * sphere.v
    }
}
