//! User-editable print settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Filament material offered by the print service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Material {
    /// Polylactic acid
    Pla,
    /// Acrylonitrile butadiene styrene
    Abs,
    /// Polyethylene terephthalate glycol
    Petg,
    /// Thermoplastic polyurethane
    Tpu,
    /// Wood-filled PLA composite
    Wood,
}

impl Material {
    /// All materials, in table order
    pub const ALL: [Material; 5] = [
        Material::Pla,
        Material::Abs,
        Material::Petg,
        Material::Tpu,
        Material::Wood,
    ];

    /// Get the display name used in reports and material tables
    pub fn name(&self) -> &'static str {
        match self {
            Material::Pla => "PLA",
            Material::Abs => "ABS",
            Material::Petg => "PETG",
            Material::Tpu => "TPU",
            Material::Wood => "WOOD",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Material::Pla => 0,
            Material::Abs => 1,
            Material::Petg => 2,
            Material::Tpu => 3,
            Material::Wood => 4,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Material::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_setting(
                    "material",
                    &format!("unknown material '{}', expected one of PLA, ABS, PETG, TPU, WOOD", s),
                )
            })
    }
}

/// Print parameters chosen by the user
///
/// Settings are independent of any particular model: the same record can be
/// applied again after a new file is uploaded. Values are not checked on
/// construction; call [`validate`](Self::validate) before handing them to the
/// estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSettings {
    /// Filament material
    pub material: Material,
    /// Interior fill, 0 to 100 percent
    pub infill_percentage: u8,
    /// Layer height in mm (practical range 0.1 to 0.4)
    pub layer_height: f64,
    /// Print speed in mm/s
    pub print_speed: u32,
    /// Whether support structures are printed
    pub supports_enabled: bool,
    /// Uniform linear scale applied on all axes (practical range 0.1 to 3.0)
    pub scale_factor: f64,
}

impl PrintSettings {
    /// Check the ranges the estimator relies on
    ///
    /// Rejects infill above 100 %, a non-positive or non-finite layer height
    /// or scale factor, and a zero print speed.
    pub fn validate(&self) -> Result<()> {
        if self.infill_percentage > 100 {
            return Err(Error::invalid_setting(
                "infillPercentage",
                &format!("{} is outside 0..=100", self.infill_percentage),
            ));
        }
        if !(self.layer_height.is_finite() && self.layer_height > 0.0) {
            return Err(Error::invalid_setting(
                "layerHeight",
                &format!("{} must be a positive number of millimeters", self.layer_height),
            ));
        }
        if self.print_speed == 0 {
            return Err(Error::invalid_setting("printSpeed", "must be positive"));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(Error::invalid_setting(
                "scaleFactor",
                &format!("{} must be a positive number", self.scale_factor),
            ));
        }
        Ok(())
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the infill percentage
    pub fn with_infill(mut self, infill_percentage: u8) -> Self {
        self.infill_percentage = infill_percentage;
        self
    }

    /// Set the layer height in mm
    pub fn with_layer_height(mut self, layer_height: f64) -> Self {
        self.layer_height = layer_height;
        self
    }

    /// Set the print speed in mm/s
    pub fn with_print_speed(mut self, print_speed: u32) -> Self {
        self.print_speed = print_speed;
        self
    }

    /// Enable or disable supports
    pub fn with_supports(mut self, supports_enabled: bool) -> Self {
        self.supports_enabled = supports_enabled;
        self
    }

    /// Set the uniform scale factor
    pub fn with_scale(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

impl Default for PrintSettings {
    /// Reference settings: PLA, 20 % infill, 0.2 mm layers, 50 mm/s,
    /// no supports, unscaled
    fn default() -> Self {
        Self {
            material: Material::Pla,
            infill_percentage: 20,
            layer_height: 0.2,
            print_speed: 50,
            supports_enabled: false,
            scale_factor: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(PrintSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = PrintSettings::default();

        let err = base.clone().with_infill(101).validate().unwrap_err();
        assert!(err.to_string().contains("infillPercentage"));

        let err = base.clone().with_layer_height(0.0).validate().unwrap_err();
        assert!(err.to_string().contains("layerHeight"));

        let err = base.clone().with_layer_height(f64::NAN).validate().unwrap_err();
        assert!(err.to_string().contains("layerHeight"));

        let err = base.clone().with_print_speed(0).validate().unwrap_err();
        assert!(err.to_string().contains("printSpeed"));

        let err = base.clone().with_scale(-1.0).validate().unwrap_err();
        assert!(err.to_string().contains("scaleFactor"));
    }

    #[test]
    fn test_validate_accepts_boundaries() {
        let settings = PrintSettings::default().with_infill(0);
        assert!(settings.validate().is_ok());
        let settings = PrintSettings::default().with_infill(100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_material_from_str() {
        assert_eq!("pla".parse::<Material>().unwrap(), Material::Pla);
        assert_eq!(" PETG ".parse::<Material>().unwrap(), Material::Petg);
        assert_eq!("Wood".parse::<Material>().unwrap(), Material::Wood);
        assert!("nylon".parse::<Material>().is_err());
    }

    #[test]
    fn test_material_index_matches_all_order() {
        for (i, material) in Material::ALL.iter().enumerate() {
            assert_eq!(material.index(), i);
        }
    }

    #[test]
    fn test_settings_json_uses_camel_case() {
        let json = serde_json::to_value(PrintSettings::default()).unwrap();
        assert_eq!(json["material"], "PLA");
        assert_eq!(json["infillPercentage"], 20);
        assert_eq!(json["layerHeight"], 0.2);
        assert_eq!(json["printSpeed"], 50);
        assert_eq!(json["supportsEnabled"], false);
        assert_eq!(json["scaleFactor"], 1.0);
    }
}
