//! Analysis inputs and outputs

use serde::{Deserialize, Serialize};

use super::mesh::BoundingBox;

/// Geometry of one uploaded file
///
/// Built once per successful decode and never modified afterwards. Volume and
/// surface area are already converted to cm³ and cm²; the bounding box stays
/// in the file's native unit (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelData {
    /// Name of the uploaded file
    pub file_name: String,
    /// Size of the uploaded file in bytes
    pub file_size_bytes: u64,
    /// Enclosed volume in cm³
    pub volume: f64,
    /// Surface area in cm²
    pub surface_area: f64,
    /// Axis-aligned bounding box in mm
    pub bounding_box: BoundingBox,
    /// Number of triangles in the mesh
    pub triangle_count: usize,
}

/// Estimate for one (model, settings) pair
///
/// Fully derived from its inputs. Volumes are in cm³, weight in grams, print
/// time in minutes and cost in the currency unit of the material table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    /// Model volume after scaling
    pub volume: f64,
    /// Infill plus shell volume
    pub effective_volume: f64,
    /// Support material volume (zero when supports are disabled)
    pub support_volume: f64,
    /// Filament weight
    pub weight: f64,
    /// Estimated print time in minutes
    pub print_time: f64,
    /// Filament cost
    pub material_cost: f64,
    /// Surface area after scaling
    pub surface_area: f64,
    /// Number of layers
    pub layer_count: u64,
}
