use std::time::Instant;

use crate::error::Result;
use crate::fitting::spheres::pack_spheres;
use crate::geometry::classifier::point_in_solid;
use crate::geometry::mesh::Mesh;
use crate::geometry::partition::{build_partitions, BandTable, Partition};
use crate::simulation::collision::{collide_with_all, RESTITUTION};
use crate::simulation::states::{NVec3, Sphere};

/// Helper: a column of `n` stacked, disjoint boxes (12 triangles each)
fn stacked_boxes(n: usize) -> Result<Mesh> {
    let boxes: Vec<(NVec3, NVec3)> = (0..n)
        .map(|i| {
            let y = i as f64 * 0.25;
            (NVec3::new(-0.5, y, -0.5), NVec3::new(0.5, y + 0.2, 0.5))
        })
        .collect();
    Mesh::from_cuboids(&boxes)
}

/// Helper: one partition over the whole mesh
fn single_partition(mesh: &Mesh) -> Vec<Partition> {
    build_partitions(mesh, &BandTable::single())
}

/// Helper: deterministic cloud of `n` small falling spheres
fn sphere_cloud(n: usize) -> Vec<Sphere> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 0.5,
                1.0 + (i_f * 0.13).cos() * 0.5,
                (i_f * 0.07).sin() * 0.5,
            );
            Sphere::new(x, NVec3::new(0.0, -1.0, 0.0), 0.03, 0.3)
        })
        .collect()
}

/// Point classification cost against mesh size
pub fn bench_classifier() -> Result<()> {
    let ns = [1, 4, 16, 64, 256];
    let queries = 2000;

    for n in ns {
        let mesh = stacked_boxes(n)?;
        let partitions = single_partition(&mesh);
        let tris = &partitions[0].triangles;

        let t0 = Instant::now();
        let mut inside = 0;
        for q in 0..queries {
            let q_f = q as f64;
            let p = NVec3::new((q_f * 0.37).sin() * 0.6, (q_f * 0.11).cos().abs() * n as f64 * 0.25, 0.0);
            if point_in_solid(&p, tris) {
                inside += 1;
            }
        }
        let per_query = t0.elapsed().as_secs_f64() / queries as f64;

        println!(
            "triangles = {:6}, inside = {:5}/{}, per query = {:10.3} us",
            mesh.triangle_count(),
            inside,
            queries,
            per_query * 1e6
        );
    }
    Ok(())
}

/// Packing time against lattice step
pub fn bench_packing() -> Result<()> {
    let mesh = stacked_boxes(8)?;
    let partitions = single_partition(&mesh);
    let radii = [0.03, 0.02, 0.015];

    for step in [0.2, 0.1, 0.05, 0.025] {
        let t0 = Instant::now();
        let packed = pack_spheres(&partitions, step, &radii, 0.3, 1)?;
        let dt = t0.elapsed().as_secs_f64();
        println!("step = {:6.3}, spheres = {:7}, time = {:8.4} s", step, packed[0].len(), dt);
    }
    Ok(())
}

/// All-pairs collision pass per sphere count
/// Paste output directly into excel to graph
pub fn bench_collisions_curve() {
    println!("N,collision_pass_ms");

    for n in (200..=3200).step_by(200) {
        let template = sphere_cloud(n);
        let passes = if n <= 800 { 5 } else { 1 };

        let mut spheres = template.clone();
        let t0 = Instant::now();
        for _ in 0..passes {
            for i in 0..spheres.len() {
                collide_with_all(&mut spheres, i, RESTITUTION);
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / passes as f64;

        println!("{},{:.6}", n, ms);
    }
}
