//! Data structures shared by the decoder, the metrics engine and the estimator

mod analysis;
mod mesh;
mod settings;

pub use analysis::{AnalysisResults, ModelData};
pub use mesh::{BoundingBox, Point3d, TriangleMesh};
pub use settings::{Material, PrintSettings};
