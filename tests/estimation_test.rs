//! Integration tests for the estimation pipeline
//!
//! Decodes fixture files, runs the estimator and checks the exported report.

mod common;

use approx::assert_relative_eq;
use common::{encode_ascii, encode_binary, unit_cube_triangles};
use stl_quote::{
    analyze_stl, AnalysisReport, Error, Material, MaterialProperties, MaterialTable, ModelData,
    ParserConfig, PrintSettings,
};

fn unit_cube_model() -> ModelData {
    let bytes = encode_binary(&unit_cube_triangles());
    ModelData::from_stl("cube.stl", &bytes, &ParserConfig::default()).unwrap()
}

#[test]
fn test_unit_cube_default_settings() {
    let results = unit_cube_model().estimate(&PrintSettings::default(), &MaterialTable::reference());

    // 1 cm³ at 20% infill: 0.20 solid + 0.15 shell
    assert_relative_eq!(results.volume, 1.0, epsilon = 1e-12);
    assert_relative_eq!(results.effective_volume, 0.35, epsilon = 1e-12);
    assert_eq!(results.support_volume, 0.0);
    assert_relative_eq!(results.weight, 0.35 * 1.24, epsilon = 1e-12);
    assert_relative_eq!(results.material_cost, 0.35 * 1.24 * 5.0, epsilon = 1e-12);
    assert_relative_eq!(results.print_time, 30.0 * 0.6, epsilon = 1e-9);
    assert_relative_eq!(results.surface_area, 6.0, epsilon = 1e-12);
    assert_eq!(results.layer_count, 50);
}

#[test]
fn test_unit_cube_with_supports_in_abs() {
    let settings = PrintSettings::default()
        .with_material(Material::Abs)
        .with_infill(100)
        .with_supports(true);
    let results = unit_cube_model().estimate(&settings, &MaterialTable::reference());

    assert_relative_eq!(results.effective_volume, 1.15, epsilon = 1e-12);
    assert_relative_eq!(results.support_volume, 0.05, epsilon = 1e-12);
    assert_relative_eq!(results.weight, 1.2 * 1.04, epsilon = 1e-12);
    assert_relative_eq!(results.material_cost, 1.2 * 1.04 * 0.023, epsilon = 1e-12);
    assert_relative_eq!(results.print_time, 30.0 * 1.0 * 1.3, epsilon = 1e-9);
}

#[test]
fn test_empty_mesh_estimates_zero() {
    let bytes = encode_binary(&[]);
    let model = ModelData::from_stl("empty.stl", &bytes, &ParserConfig::default()).unwrap();
    let settings = PrintSettings::default().with_supports(true).with_scale(3.0);
    let results = model.estimate(&settings, &MaterialTable::reference());

    assert_eq!(model.triangle_count, 0);
    assert_eq!(results.weight, 0.0);
    assert_eq!(results.print_time, 0.0);
    assert_eq!(results.material_cost, 0.0);
    assert_eq!(results.layer_count, 0);
}

#[test]
fn test_injected_material_table() {
    let table = MaterialTable::reference()
        .with_material(Material::Pla, MaterialProperties::new(1.0, 0.02));
    let results = unit_cube_model().estimate(&PrintSettings::default(), &table);

    assert_relative_eq!(results.weight, 0.35, epsilon = 1e-12);
    assert_relative_eq!(results.material_cost, 0.007, epsilon = 1e-12);
}

#[test]
fn test_analyze_stl_pipeline() {
    let bytes = encode_ascii("cube", &unit_cube_triangles());
    let settings = PrintSettings::default().with_infill(50).with_scale(2.0);
    let report = analyze_stl("cube.stl", &bytes, &settings, &MaterialTable::reference()).unwrap();

    assert_eq!(report.file_name, "cube.stl");
    assert_eq!(report.settings, settings);
    assert_relative_eq!(report.analysis.volume, 8.0, epsilon = 1e-9);
    assert_relative_eq!(report.analysis.surface_area, 24.0, epsilon = 1e-9);
    assert_eq!(report.analysis.layer_count, 100);
}

#[test]
fn test_analyze_stl_rejects_invalid_settings() {
    let bytes = encode_binary(&unit_cube_triangles());
    let settings = PrintSettings::default().with_layer_height(0.0);
    let err = analyze_stl("cube.stl", &bytes, &settings, &MaterialTable::reference()).unwrap_err();
    assert!(matches!(err, Error::InvalidSettings(_)));
}

#[test]
fn test_analyze_stl_propagates_decode_error() {
    let mut bytes = encode_binary(&unit_cube_triangles());
    bytes.truncate(200);
    let err = analyze_stl(
        "cube.stl",
        &bytes,
        &PrintSettings::default(),
        &MaterialTable::reference(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Truncated { .. }));
}

#[test]
fn test_report_file_round_trip() {
    let bytes = encode_binary(&unit_cube_triangles());
    let report = analyze_stl(
        "cube.stl",
        &bytes,
        &PrintSettings::default().with_material(Material::Petg),
        &MaterialTable::reference(),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report
        .write_json(std::fs::File::create(&path).unwrap())
        .unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"fileName\": \"cube.stl\""));
    assert!(json.contains("\"material\": \"PETG\""));

    let parsed = AnalysisReport::from_json(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_material_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("materials.json");
    std::fs::write(
        &path,
        r#"{ "TPU": { "density": 1.21, "costPerGram": 0.05 } }"#,
    )
    .unwrap();

    let table = MaterialTable::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(table.density(Material::Tpu), 1.21);
    assert_eq!(table.cost_per_gram(Material::Tpu), 0.05);
    assert_eq!(table.get(Material::Wood), MaterialTable::reference().get(Material::Wood));
}

#[test]
fn test_material_table_rejects_bad_values() {
    assert!(matches!(
        MaterialTable::from_json(r#"{ "ABS": { "density": -1.0, "costPerGram": 0.02 } }"#),
        Err(Error::InvalidMaterialTable(_))
    ));
    assert!(matches!(
        MaterialTable::from_json(r#"{ "NYLON": { "density": 1.1, "costPerGram": 0.02 } }"#),
        Err(Error::InvalidMaterialTable(_))
    ));
}
