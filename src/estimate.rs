//! Print cost and time estimation
//!
//! Turns model geometry and print settings into weight, print time, material
//! cost and layer count. Every formula here is a fixed heuristic tuned to
//! reference settings (0.2 mm layers at 50 mm/s), not a slicer simulation.
//!
//! The estimator does not validate its inputs. A zero layer height or print
//! speed produces infinities or NaN; callers check settings with
//! [`PrintSettings::validate`] first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::model::{AnalysisResults, Material, ModelData, PrintSettings};

/// Shell volume as a fraction of the scaled model volume
pub const SHELL_FRACTION: f64 = 0.15;

/// Support volume as a fraction of the scaled model volume
pub const SUPPORT_FRACTION: f64 = 0.05;

/// Minutes per cm³ at reference settings
pub const BASE_TIME_PER_CM3: f64 = 30.0;

/// Print time multiplier when supports are enabled
pub const SUPPORT_TIME_FACTOR: f64 = 1.3;

/// Layer height the time model is calibrated for, in mm
pub const REFERENCE_LAYER_HEIGHT: f64 = 0.2;

/// Print speed the time model is calibrated for, in mm/s
pub const REFERENCE_PRINT_SPEED: f64 = 50.0;

/// Exponent applied to the scale factor in the time model
pub const SCALE_TIME_EXPONENT: f64 = 2.5;

/// Physical and pricing properties of one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    /// Density in g/cm³
    pub density: f64,
    /// Price per gram in the table's currency unit
    pub cost_per_gram: f64,
}

impl MaterialProperties {
    /// Create a new property record
    pub fn new(density: f64, cost_per_gram: f64) -> Self {
        Self {
            density,
            cost_per_gram,
        }
    }
}

/// Density and price for every [`Material`]
///
/// The table always has an entry for each material, so lookups cannot fail.
/// It is passed into the estimator rather than read from global state, which
/// lets quotes be computed against alternative price lists.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    entries: [MaterialProperties; Material::ALL.len()],
}

impl MaterialTable {
    /// The price list the service quotes with
    ///
    /// PLA's cost per gram (5.0) is two orders of magnitude above every other
    /// entry and is probably a data-entry error. It is kept as published until
    /// the intended value is confirmed.
    pub fn reference() -> Self {
        let mut entries = [MaterialProperties::new(0.0, 0.0); Material::ALL.len()];
        entries[Material::Pla.index()] = MaterialProperties::new(1.24, 5.0);
        entries[Material::Abs.index()] = MaterialProperties::new(1.04, 0.023);
        entries[Material::Petg.index()] = MaterialProperties::new(1.27, 0.03);
        entries[Material::Tpu.index()] = MaterialProperties::new(1.20, 0.045);
        entries[Material::Wood.index()] = MaterialProperties::new(1.28, 0.035);
        Self { entries }
    }

    /// Replace the properties of one material
    pub fn with_material(mut self, material: Material, properties: MaterialProperties) -> Self {
        self.entries[material.index()] = properties;
        self
    }

    /// Look up the properties of a material
    pub fn get(&self, material: Material) -> MaterialProperties {
        self.entries[material.index()]
    }

    /// Density in g/cm³
    pub fn density(&self, material: Material) -> f64 {
        self.get(material).density
    }

    /// Price per gram
    pub fn cost_per_gram(&self, material: Material) -> f64 {
        self.get(material).cost_per_gram
    }

    /// Load overrides from JSON on top of the reference table
    ///
    /// The JSON object maps material names to property records; materials
    /// that are not mentioned keep their reference values. Names are matched
    /// case-insensitively, like [`Material`]'s `FromStr`, and each material
    /// may appear only once.
    ///
    /// ```
    /// use stl_quote::{Material, MaterialTable};
    ///
    /// let table = MaterialTable::from_json(r#"{"PLA": {"density": 1.24, "costPerGram": 0.05}}"#)
    ///     .unwrap();
    /// assert_eq!(table.cost_per_gram(Material::Pla), 0.05);
    /// assert_eq!(table.cost_per_gram(Material::Abs), 0.023);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: BTreeMap<String, MaterialProperties> = serde_json::from_str(json)
            .map_err(|e| Error::InvalidMaterialTable(e.to_string()))?;

        let mut table = Self::reference();
        let mut seen = [false; Material::ALL.len()];
        for (name, properties) in overrides {
            let material: Material = name.parse().map_err(|_| {
                Error::InvalidMaterialTable(format!(
                    "unknown material '{}', expected one of PLA, ABS, PETG, TPU, WOOD",
                    name
                ))
            })?;
            if std::mem::replace(&mut seen[material.index()], true) {
                return Err(Error::InvalidMaterialTable(format!(
                    "{} is listed more than once",
                    material
                )));
            }
            if !(properties.density.is_finite() && properties.density > 0.0) {
                return Err(Error::InvalidMaterialTable(format!(
                    "{}: density must be positive, got {}",
                    material, properties.density
                )));
            }
            if !(properties.cost_per_gram.is_finite() && properties.cost_per_gram >= 0.0) {
                return Err(Error::InvalidMaterialTable(format!(
                    "{}: cost per gram must not be negative, got {}",
                    material, properties.cost_per_gram
                )));
            }
            table = table.with_material(material, properties);
        }
        Ok(table)
    }

    /// Serialize the full table as a JSON object keyed by material name
    ///
    /// Keys follow [`Material::ALL`] order, so the same table always gives
    /// the same text.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for MaterialTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(Material::ALL.iter().map(|m| (m, self.get(*m))))
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Produce the quote for one model and one set of settings
///
/// ```text
/// scaledVolume    = volume * s³
/// effectiveVolume = scaledVolume * infill/100 + scaledVolume * 0.15
/// supportVolume   = supports ? scaledVolume * 0.05 : 0
/// weight          = (effectiveVolume + supportVolume) * density
/// printTime       = scaledVolume * 30 * (0.5 + infill/200) * (supports ? 1.3 : 1)
///                   * (0.2 / layerHeight) * (50 / printSpeed) * s^2.5
/// materialCost    = weight * costPerGram
/// layerCount      = ceil(bbox.max.z * s / layerHeight)
/// ```
///
/// Surface area scales with s². Scaling is uniform on all axes. The layer
/// count uses the top of the unscaled bounding box, so a model that does not
/// sit on z = 0 is counted from the origin.
#[instrument(level = "debug", skip_all, fields(file = %model.file_name, material = %settings.material))]
pub fn estimate(
    model: &ModelData,
    settings: &PrintSettings,
    table: &MaterialTable,
) -> AnalysisResults {
    let s = settings.scale_factor;
    let infill = f64::from(settings.infill_percentage);
    let properties = table.get(settings.material);

    let scaled_volume = model.volume * s.powi(3);
    let scaled_surface_area = model.surface_area * s.powi(2);

    let solid_volume = scaled_volume * (infill / 100.0);
    let shell_volume = scaled_volume * SHELL_FRACTION;
    let effective_volume = solid_volume + shell_volume;
    let support_volume = if settings.supports_enabled {
        scaled_volume * SUPPORT_FRACTION
    } else {
        0.0
    };
    let total_volume = effective_volume + support_volume;

    let weight = total_volume * properties.density;

    let infill_factor = 0.5 + infill / 200.0;
    let support_factor = if settings.supports_enabled {
        SUPPORT_TIME_FACTOR
    } else {
        1.0
    };
    let layer_height_factor = REFERENCE_LAYER_HEIGHT / settings.layer_height;
    let speed_factor = REFERENCE_PRINT_SPEED / f64::from(settings.print_speed);
    let scale_time_factor = s.powf(SCALE_TIME_EXPONENT);
    let print_time = scaled_volume
        * BASE_TIME_PER_CM3
        * infill_factor
        * support_factor
        * layer_height_factor
        * speed_factor
        * scale_time_factor;

    let material_cost = weight * properties.cost_per_gram;

    // `as` saturates: NaN and negative heights become zero layers
    let layer_count = (model.bounding_box.max.z * s / settings.layer_height).ceil() as u64;

    debug!(
        scaled_volume,
        total_volume, weight, print_time, material_cost, layer_count, "estimated print"
    );

    AnalysisResults {
        volume: scaled_volume,
        effective_volume,
        support_volume,
        weight,
        print_time,
        material_cost,
        surface_area: scaled_surface_area,
        layer_count,
    }
}
