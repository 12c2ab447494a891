//! Triangle-list meshes
//!
//! A `Mesh` is a flat list of points where every 3 consecutive points form
//! one triangle (no index buffer). Meshes are immutable once built; the
//! partition builder borrows them.

use crate::error::{DisperseError, Result};
use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<NVec3>,
}

impl Mesh {
    /// Wrap raw triangle-list vertices
    pub fn from_vertices(vertices: Vec<NVec3>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(DisperseError::MalformedMesh("mesh has no vertices".into()));
        }
        if vertices.len() % 3 != 0 {
            return Err(DisperseError::MalformedMesh(format!(
                "vertex count {} is not a multiple of 3",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Closed axis-aligned box between `min` and `max` (12 triangles)
    pub fn cuboid(min: NVec3, max: NVec3) -> Result<Self> {
        Self::from_vertices(cuboid_triangles(&min, &max)?)
    }

    /// Union of disjoint boxes, one closed shell each
    ///
    /// Boxes must not overlap, otherwise the parity classifier sees the
    /// shared volume as outside.
    pub fn from_cuboids(boxes: &[(NVec3, NVec3)]) -> Result<Self> {
        let mut vertices = Vec::with_capacity(boxes.len() * 36);
        for (min, max) in boxes {
            vertices.extend(cuboid_triangles(min, max)?);
        }
        Self::from_vertices(vertices)
    }

    pub fn vertices(&self) -> &[NVec3] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate triangles as `[v0, v1, v2]` slices
    pub fn triangles(&self) -> impl Iterator<Item = &[NVec3]> {
        self.vertices.chunks_exact(3)
    }

    /// Axis-aligned extents of every vertex
    pub fn bounds(&self) -> (NVec3, NVec3) {
        let mut min = NVec3::repeat(f64::INFINITY);
        let mut max = NVec3::repeat(f64::NEG_INFINITY);
        for v in &self.vertices {
            min = min.inf(v);
            max = max.sup(v);
        }
        (min, max)
    }
}

/// The eight corners of a box, ordered
/// `[top-left-front, top-left-back, top-right-front, top-right-back,
///   bot-left-front, bot-left-back, bot-right-front, bot-right-back]`
/// where left/right is x, bottom/top is y and back/front is z.
pub fn box_corners(min: &NVec3, max: &NVec3) -> [NVec3; 8] {
    [
        NVec3::new(min.x, max.y, max.z),
        NVec3::new(min.x, max.y, min.z),
        NVec3::new(max.x, max.y, max.z),
        NVec3::new(max.x, max.y, min.z),
        NVec3::new(min.x, min.y, max.z),
        NVec3::new(min.x, min.y, min.z),
        NVec3::new(max.x, min.y, max.z),
        NVec3::new(max.x, min.y, min.z),
    ]
}

/// Triangulate the six faces of a box from its corners (36 vertices)
pub fn box_shell(corners: &[NVec3; 8]) -> Vec<NVec3> {
    let [tlf, tlb, trf, trb, blf, blb, brf, brb] = *corners;
    vec![
        // top
        tlf, tlb, trb,
        tlf, trf, trb,
        // front
        tlf, trf, blf,
        trf, blf, brf,
        // left
        tlf, tlb, blb,
        tlf, blb, blf,
        // back
        tlb, trb, blb,
        trb, blb, brb,
        // right
        trf, trb, brf,
        trb, brf, brb,
        // bottom
        blf, blb, brb,
        blf, brf, brb,
    ]
}

fn cuboid_triangles(min: &NVec3, max: &NVec3) -> Result<Vec<NVec3>> {
    if (0..3).any(|axis| max[axis] <= min[axis]) {
        return Err(DisperseError::MalformedMesh(format!(
            "cuboid has non-positive extent: min {:?}, max {:?}",
            min.as_slice(),
            max.as_slice()
        )));
    }
    Ok(box_shell(&box_corners(min, max)))
}
