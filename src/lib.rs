//! # stl-quote
//!
//! STL mesh analysis for 3D-printing quotes.
//!
//! This library decodes binary or ASCII STL straight from a byte buffer,
//! measures the mesh (volume, surface area, bounding box) and turns the
//! measurements into a print estimate: weight, print time, material cost and
//! layer count for a chosen material, infill, layer height, speed, support
//! setting and scale.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Binary and ASCII STL decoding with a configurable size limit
//! - Signed-tetrahedron volume and cross-product surface area
//! - Injectable material price list
//! - JSON report export
//!
//! ## Example
//!
//! ```no_run
//! use stl_quote::{MaterialTable, ModelData, ParserConfig, PrintSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("bracket.stl")?;
//! let model = ModelData::from_stl("bracket.stl", &bytes, &ParserConfig::default())?;
//!
//! let settings = PrintSettings::default().with_infill(40);
//! settings.validate()?;
//! let results = model.estimate(&settings, &MaterialTable::reference());
//!
//! println!("{}", results);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod estimate;
pub mod mesh_ops;
pub mod model;
pub mod parser;
pub mod report;
pub mod writer;

pub use error::{Error, Result};
pub use estimate::{MaterialProperties, MaterialTable};
pub use mesh_ops::GeometryMetrics;
pub use model::{
    AnalysisResults, BoundingBox, Material, ModelData, Point3d, PrintSettings, TriangleMesh,
};
pub use parser::{FormatDetection, ParserConfig, StlFormat};
pub use report::AnalysisReport;

use tracing::{info, instrument};

impl ModelData {
    /// Build model data from an already decoded mesh
    ///
    /// A mesh without vertices gets an all-zero bounding box.
    pub fn from_mesh(file_name: impl Into<String>, file_size_bytes: u64, mesh: &TriangleMesh) -> Self {
        let metrics = mesh_ops::compute_metrics(mesh);
        Self {
            file_name: file_name.into(),
            file_size_bytes,
            volume: metrics.volume,
            surface_area: metrics.surface_area,
            bounding_box: metrics.bounding_box.unwrap_or_else(BoundingBox::empty),
            triangle_count: mesh.triangle_count(),
        }
    }

    /// Decode an STL buffer and measure it
    ///
    /// Decode failures abort immediately; nothing is measured from a
    /// partially read file.
    ///
    /// # Example
    ///
    /// ```
    /// use stl_quote::{ModelData, ParserConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let stl = b"solid empty\nendsolid empty\n";
    /// let model = ModelData::from_stl("empty.stl", stl, &ParserConfig::default())?;
    /// assert_eq!(model.triangle_count, 0);
    /// assert_eq!(model.volume, 0.0);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(level = "debug", skip(bytes, config), fields(len = bytes.len()))]
    pub fn from_stl(file_name: &str, bytes: &[u8], config: &ParserConfig) -> Result<Self> {
        let mesh = parser::parse_stl_with_config(bytes, config)?;
        Ok(Self::from_mesh(file_name, bytes.len() as u64, &mesh))
    }

    /// Estimate weight, time and cost for these settings
    ///
    /// Settings are not validated here; see [`PrintSettings::validate`].
    pub fn estimate(&self, settings: &PrintSettings, table: &MaterialTable) -> AnalysisResults {
        estimate::estimate(self, settings, table)
    }
}

/// Decode, measure and estimate in one call
///
/// Runs the whole pipeline with the default parser configuration and returns
/// a report stamped with the current time. Settings are checked with
/// [`PrintSettings::validate`] before estimating.
///
/// # Example
///
/// ```
/// use stl_quote::{analyze_stl, MaterialTable, PrintSettings};
///
/// let stl = b"solid tri
/// facet normal 0 0 1
/// vertex 0 0 0
/// vertex 10 0 0
/// vertex 0 10 0
/// endsolid tri";
///
/// let report = analyze_stl("tri.stl", stl, &PrintSettings::default(), &MaterialTable::reference())
///     .unwrap();
/// assert_eq!(report.analysis.volume, 0.0);
/// assert!((report.analysis.surface_area - 0.5).abs() < 1e-12);
/// ```
pub fn analyze_stl(
    file_name: &str,
    bytes: &[u8],
    settings: &PrintSettings,
    table: &MaterialTable,
) -> Result<AnalysisReport> {
    settings.validate()?;
    let model = ModelData::from_stl(file_name, bytes, &ParserConfig::default())?;
    let analysis = model.estimate(settings, table);

    info!(
        file = file_name,
        triangles = model.triangle_count,
        volume_cm3 = analysis.volume,
        weight_g = analysis.weight,
        print_time_min = analysis.print_time,
        "analysis complete"
    );

    Ok(AnalysisReport::now(file_name, analysis, settings.clone()))
}
