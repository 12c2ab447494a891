//! Core state types for the dispersion simulation.
//!
//! - `Sphere`    one rigid sphere of a packed body
//! - `Lifecycle` the monotonic idle → triggered → dissolving → retired machine
//! - `Body`      one simulated instance of the mesh (spheres, billboards, state)
//!
//! Positions are world space. The dissolve level of a body is model-local and
//! is lifted into world space with the body's placement offset.

use nalgebra::{Matrix4, Vector3};

use crate::simulation::billboards::BillboardGenerator;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub p: NVec3, // momentum
    pub m: f64, // mass
    pub radius: f64, // radius
    pub start_height: f64, // world height of the center when packed
}

impl Sphere {
    pub fn new(x: NVec3, v: NVec3, radius: f64, m: f64) -> Self {
        Self {
            x,
            v,
            p: m * v,
            m,
            radius,
            start_height: x.y,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    /// Potential (relative to the floor) plus kinetic energy
    pub fn mechanical_energy(&self, g: f64) -> f64 {
        self.m * g * self.x.y + self.kinetic_energy()
    }

    /// Shift the sphere and its recorded start height
    pub fn translate(&mut self, offset: &NVec3) {
        self.x += offset;
        self.start_height += offset.y;
    }

    /// World transform for drawing: translation times uniform scale
    pub fn transform(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.x) * Matrix4::new_scaling(self.radius)
    }
}

/// Body lifecycle; variants are ordered so transitions can only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lifecycle {
    Idle,
    Triggered,
    Dissolving,
    Retired,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub index: usize,
    pub position: NVec3, // placement offset of the model
    pub spheres: Vec<Sphere>,
    pub billboards: BillboardGenerator,
    pub dissolve_level: f64, // model-local height of the dissolve front
    pub next_row: usize, // next billboard row to release
    lifecycle: Lifecycle,
}

impl Body {
    pub fn new(index: usize, position: NVec3, spheres: Vec<Sphere>, billboards: BillboardGenerator, top: f64) -> Self {
        Self {
            index,
            position,
            spheres,
            billboards,
            dissolve_level: top,
            next_row: 0,
            lifecycle: Lifecycle::Idle,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Move to `next` if it lies ahead of the current state
    /// Returns whether the state changed
    pub fn advance_to(&mut self, next: Lifecycle) -> bool {
        if next > self.lifecycle {
            self.lifecycle = next;
            true
        } else {
            false
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.lifecycle >= Lifecycle::Triggered
    }

    pub fn is_dissolving(&self) -> bool {
        self.lifecycle == Lifecycle::Dissolving
    }

    pub fn is_retired(&self) -> bool {
        self.lifecycle == Lifecycle::Retired
    }

    /// World height of the dissolve front
    pub fn dissolve_height(&self) -> f64 {
        self.dissolve_level + self.position.y
    }

    /// A sphere moves once the dissolve front has passed below its bottom
    pub fn is_released(&self, sphere: &Sphere) -> bool {
        sphere.start_height - sphere.radius >= self.dissolve_height()
    }

    /// Shift the body, its spheres included
    pub fn translate(&mut self, offset: &NVec3) {
        self.position += offset;
        for s in self.spheres.iter_mut() {
            s.translate(offset);
        }
    }

    pub fn sphere_transforms(&self) -> Vec<Matrix4<f64>> {
        self.spheres.iter().map(Sphere::transform).collect()
    }

    pub fn billboard_transforms(&self) -> Vec<Matrix4<f64>> {
        self.billboards.active().map(|b| b.transform).collect()
    }
}
