//! Triangle soup produced by the STL decoder

use serde::{Deserialize, Serialize};

/// A point in the mesh's native linear unit (millimeters by convention)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3d {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3d {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounding box in native file units
///
/// `min` is component-wise less than or equal to `max`. Planar meshes produce
/// a box with zero thickness along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3d,
    /// Maximum corner
    pub max: Point3d,
}

impl BoundingBox {
    /// Create a bounding box from its two corners
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// The all-zero box used for meshes without vertices
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extent along each axis as (dx, dy, dz)
    pub fn size(&self) -> (f64, f64, f64) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Flat triangle list as stored in an STL file
///
/// Triangles do not share vertices. `vertices` holds three 3D points per
/// triangle in file order; `normals` repeats the facet normal read from the
/// file once per vertex, so both sequences always have
/// `9 * triangle_count` entries. Normals are kept for display only and are
/// never recomputed from the winding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    triangle_count: usize,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mesh with room for `triangles` triangles
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 9),
            normals: Vec::with_capacity(triangles * 9),
            triangle_count: 0,
        }
    }

    /// Append one triangle with its facet normal
    pub fn push_triangle(&mut self, normal: [f32; 3], corners: [[f32; 3]; 3]) {
        self.push_corners(corners.map(|corner| (corner, normal)));
    }

    /// Append one triangle given as (position, normal) pairs
    ///
    /// ASCII files attach whatever normal was current when each vertex was
    /// read, which in malformed files may differ within one triangle.
    pub(crate) fn push_corners(&mut self, corners: [([f32; 3], [f32; 3]); 3]) {
        for (position, normal) in corners {
            self.vertices.extend_from_slice(&position);
            self.normals.extend_from_slice(&normal);
        }
        self.triangle_count += 1;
    }

    /// Flat vertex coordinates, nine per triangle
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Flat per-vertex normals, parallel to [`vertices`](Self::vertices)
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Iterate over triangles as three corner points each
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.vertices.chunks_exact(9).map(|t| {
            [
                [t[0], t[1], t[2]],
                [t[3], t[4], t[5]],
                [t[6], t[7], t[8]],
            ]
        })
    }

    /// Facet normal of triangle `index` as read from the file
    pub fn facet_normal(&self, index: usize) -> Option<[f32; 3]> {
        let start = index.checked_mul(9)?;
        let n = self.normals.get(start..start.checked_add(3)?)?;
        Some([n[0], n[1], n[2]])
    }
}
