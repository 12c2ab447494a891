//! Billboard particles for the dissolve effect
//!
//! A `BillboardGenerator` owns one body's particles, grouped in rows that
//! mirror the rows of a [`BillboardMap`]. Rows start parked; `activate_row`
//! gives every particle of the row a small random drift and from then on
//! `update` moves, ages and re-orients it every tick. Orientation is
//! cylindrical: particles turn about a horizontal-plane axis to face the
//! viewpoint, never tilting vertically.

use std::f64::consts::PI;

use nalgebra::{Matrix4, Rotation3, Unit};
use rand::Rng;

use crate::fitting::billboard_map::{cell_center, BillboardMap};
use crate::geometry::partition::Partition;
use crate::simulation::states::NVec3;

/// Axis the untransformed quad faces
const FORWARD: [f64; 3] = [0.0, 0.0, 1.0];

#[derive(Debug, Clone)]
pub struct Billboard {
    pub pos: NVec3, // model-local position
    pub velocity: NVec3, // displacement per tick
    pub size: f64,
    pub life: i32, // ticks left, pruned once negative
    pub transform: Matrix4<f64>,
}

impl Billboard {
    pub fn new(pos: NVec3, size: f64, life: i32) -> Self {
        Self {
            pos,
            velocity: NVec3::zeros(),
            size,
            life,
            transform: Matrix4::identity(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillboardRow {
    pub billboards: Vec<Billboard>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct BillboardGenerator {
    rows: Vec<BillboardRow>,
    size: f64,
}

impl BillboardGenerator {
    /// One particle per occupied map cell, one row per map row
    pub fn new(partitions: &[Partition], map: &BillboardMap, life: i32) -> Self {
        let mut rows = Vec::with_capacity(map.row_count());
        for (partition, grid) in partitions.iter().zip(map.grids.iter()) {
            for j in 0..grid.rows {
                let billboards = (0..grid.cols)
                    .filter(|&k| grid.is_occupied(j, k))
                    .map(|k| Billboard::new(cell_center(partition, j, k, map.size), map.size, life))
                    .collect();
                rows.push(BillboardRow { billboards, active: false });
            }
        }
        Self { rows, size: map.size }
    }

    pub fn rows(&self) -> &[BillboardRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Release `row`: random lateral jitter, dominant upward drift
    /// Returns false if the row does not exist
    pub fn activate_row<R: Rng + ?Sized>(&mut self, row: usize, speed: f64, rng: &mut R) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        for b in r.billboards.iter_mut() {
            let ux = rng.gen_range(-0.5..0.5);
            let uz = rng.gen_range(-0.5..0.5);
            b.velocity = speed * NVec3::new(ux, 1.0, uz);
        }
        r.active = true;
        true
    }

    /// Advance every active particle one tick and face it toward `viewpoint`
    pub fn update(&mut self, offset: &NVec3, viewpoint: &NVec3) {
        for row in self.rows.iter_mut().filter(|r| r.active) {
            for b in row.billboards.iter_mut() {
                b.pos += b.velocity;
                b.life -= 1;

                let world = offset + b.pos;
                let rotation = match billboard_rotation(&world, viewpoint) {
                    Some((axis, angle)) => Rotation3::from_axis_angle(&axis, angle + PI).to_homogeneous(),
                    None => Matrix4::identity(),
                };
                b.transform = Matrix4::new_translation(&world) * rotation * Matrix4::new_scaling(b.size);
            }
        }
    }

    /// Drop particles of active rows whose life went negative
    /// Returns how many were removed
    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        for row in self.rows.iter_mut().filter(|r| r.active) {
            let before = row.billboards.len();
            row.billboards.retain(|b| b.life >= 0);
            removed += before - row.billboards.len();
        }
        removed
    }

    /// Particles of active rows
    pub fn active(&self) -> impl Iterator<Item = &Billboard> {
        self.rows.iter().filter(|r| r.active).flat_map(|r| r.billboards.iter())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn total_count(&self) -> usize {
        self.rows.iter().map(|r| r.billboards.len()).sum()
    }
}

/// Rotation axis and angle turning the forward axis toward `camera` in the
/// horizontal plane. `None` if the camera is straight above or below.
pub fn billboard_rotation(particle: &NVec3, camera: &NVec3) -> Option<(Unit<NVec3>, f64)> {
    let mut dir = camera - particle;
    dir.y = 0.0;
    let dir = dir.try_normalize(1e-12)?;

    let forward = NVec3::from(FORWARD);
    let angle = forward.dot(&dir).clamp(-1.0, 1.0).acos();
    // facing straight along or against forward: any horizontal-plane normal works
    let axis = Unit::try_new(forward.cross(&dir), 1e-12).unwrap_or_else(NVec3::y_axis);
    Some((axis, angle))
}
