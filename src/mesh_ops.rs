//! Geometric measurements on triangle soup
//!
//! This module provides:
//! - Signed and unsigned volume (divergence theorem)
//! - Surface area
//! - Axis-aligned bounding box
//! - Face normals
//!
//! Inputs are in the file's native unit (millimeters by convention). Volume
//! and area results are converted to cm³ and cm²; the bounding box is not.
//! Coordinates are widened to `f64` before any arithmetic.

use nalgebra::Vector3;
use tracing::{debug, instrument};

use crate::model::{BoundingBox, Point3d, TriangleMesh};

/// mm³ per cm³
const MM3_PER_CM3: f64 = 1000.0;

/// mm² per cm²
const MM2_PER_CM2: f64 = 100.0;

/// Volume, area and extent of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMetrics {
    /// Enclosed volume in cm³ (absolute value)
    pub volume: f64,
    /// Surface area in cm²
    pub surface_area: f64,
    /// Bounding box in native units, `None` for a mesh without vertices
    pub bounding_box: Option<BoundingBox>,
}

#[inline]
fn to_vector(p: [f32; 3]) -> Vector3<f64> {
    Vector3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
}

/// Signed volume of the tetrahedron spanned by the origin and a triangle
#[inline]
fn signed_tetra_volume(v1: &Vector3<f64>, v2: &Vector3<f64>, v3: &Vector3<f64>) -> f64 {
    v1.dot(&v2.cross(v3)) / 6.0
}

/// Area of a triangle
#[inline]
fn triangle_area(v1: &Vector3<f64>, v2: &Vector3<f64>, v3: &Vector3<f64>) -> f64 {
    (v2 - v1).cross(&(v3 - v1)).norm() / 2.0
}

/// Compute the signed volume of a mesh using the divergence theorem
///
/// Returns mm³ (native units cubed). Counter-clockwise winding seen from
/// outside gives a positive result for a closed mesh; reversing every
/// triangle flips the sign.
///
/// # Arguments
/// * `mesh` - The mesh to compute volume for
pub fn compute_mesh_signed_volume(mesh: &TriangleMesh) -> f64 {
    mesh.triangles()
        .fold(0.0, |acc, [a, b, c]| {
            acc + signed_tetra_volume(&to_vector(a), &to_vector(b), &to_vector(c))
        })
}

/// Compute the enclosed volume of a mesh in cm³
///
/// Taking the absolute value makes the result independent of a global
/// winding flip. Open meshes and meshes that mix winding directions between
/// triangles partially cancel and come out too small; this is not detected.
pub fn compute_mesh_volume(mesh: &TriangleMesh) -> f64 {
    compute_mesh_signed_volume(mesh).abs() / MM3_PER_CM3
}

/// Compute the total surface area of a mesh in cm²
///
/// Degenerate triangles (coincident or collinear corners) contribute zero.
pub fn compute_mesh_surface_area(mesh: &TriangleMesh) -> f64 {
    let area_mm2 = mesh.triangles().fold(0.0, |acc, [a, b, c]| {
        acc + triangle_area(&to_vector(a), &to_vector(b), &to_vector(c))
    });
    area_mm2 / MM2_PER_CM2
}

/// Compute the axis-aligned bounding box (AABB) of a mesh
///
/// Returns `None` when the mesh has no vertices.
pub fn compute_mesh_aabb(mesh: &TriangleMesh) -> Option<BoundingBox> {
    if mesh.is_empty() {
        return None;
    }

    let mut min = Vector3::repeat(f64::INFINITY);
    let mut max = Vector3::repeat(f64::NEG_INFINITY);
    for point in mesh.vertices().chunks_exact(3) {
        let p = to_vector([point[0], point[1], point[2]]);
        min = min.inf(&p);
        max = max.sup(&p);
    }

    Some(BoundingBox::new(
        Point3d::new(min.x, min.y, min.z),
        Point3d::new(max.x, max.y, max.z),
    ))
}

/// Compute volume, surface area and bounding box
///
/// Volume and area share one pass over the triangles; the bounding box takes
/// a second pass over the vertices. An empty mesh gives exact zeros.
#[instrument(level = "debug", skip_all, fields(triangles = mesh.triangle_count()))]
pub fn compute_metrics(mesh: &TriangleMesh) -> GeometryMetrics {
    let mut signed_volume = 0.0_f64;
    let mut area = 0.0_f64;
    for [a, b, c] in mesh.triangles() {
        let (v1, v2, v3) = (to_vector(a), to_vector(b), to_vector(c));
        signed_volume += signed_tetra_volume(&v1, &v2, &v3);
        area += triangle_area(&v1, &v2, &v3);
    }

    let metrics = GeometryMetrics {
        volume: signed_volume.abs() / MM3_PER_CM3,
        surface_area: area / MM2_PER_CM2,
        bounding_box: compute_mesh_aabb(mesh),
    };

    debug!(
        signed_volume_mm3 = signed_volume,
        volume_cm3 = metrics.volume,
        surface_area_cm2 = metrics.surface_area,
        "computed mesh metrics"
    );
    metrics
}

/// Calculate the unit normal of a triangle from its winding
///
/// The normal is the normalized cross product of two edges. If the triangle
/// is degenerate (zero area), returns a zero vector.
///
/// # Example
/// ```
/// use stl_quote::mesh_ops::calculate_face_normal;
///
/// let normal = calculate_face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
/// assert_eq!(normal, [0.0, 0.0, 1.0]);
/// ```
pub fn calculate_face_normal(v1: [f32; 3], v2: [f32; 3], v3: [f32; 3]) -> [f32; 3] {
    let (a, b, c) = (to_vector(v1), to_vector(v2), to_vector(v3));
    let normal = (b - a).cross(&(c - a));
    let length = normal.norm();

    if length > f64::EPSILON {
        let n = normal / length;
        [n.x as f32, n.y as f32, n.z as f32]
    } else {
        [0.0, 0.0, 0.0]
    }
}
