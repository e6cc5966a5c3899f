//! STL Print Quote
//!
//! A command-line tool that measures an STL file and estimates what it costs
//! to print, using the stl-quote library.
//!
//! Features:
//! - Binary and ASCII STL input
//! - Volume, surface area, bounding box and layer count
//! - Weight, print time and material cost for a chosen material
//! - Custom material price lists (JSON)
//! - JSON report export
//!
//! Set `RUST_LOG=stl_quote=debug` to trace the decoder and estimator.

#![forbid(unsafe_code)]

use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use stl_quote::{
    AnalysisReport, FormatDetection, Material, MaterialTable, ModelData, ParserConfig,
    PrintSettings,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the quote tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the STL file to analyze
    #[arg(value_name = "FILE")]
    file_path: PathBuf,

    /// Filament material (PLA, ABS, PETG, TPU, WOOD)
    #[arg(short, long, default_value = "PLA")]
    material: Material,

    /// Infill percentage (0-100)
    #[arg(short, long, default_value_t = 20)]
    infill: u8,

    /// Layer height in mm
    #[arg(short, long, default_value_t = 0.2)]
    layer_height: f64,

    /// Print speed in mm/s
    #[arg(long, default_value_t = 50)]
    speed: u32,

    /// Print support structures
    #[arg(long)]
    supports: bool,

    /// Uniform scale factor applied on all axes
    #[arg(short, long, default_value_t = 1.0)]
    scale: f64,

    /// JSON file overriding material densities and prices
    #[arg(long, value_name = "TABLE")]
    materials: Option<PathBuf>,

    /// Fall back to binary decoding for binary files whose header starts with "solid"
    #[arg(long)]
    strict_detection: bool,

    /// Print the JSON report instead of the summary
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> PrintSettings {
        PrintSettings::default()
            .with_material(self.material)
            .with_infill(self.infill)
            .with_layer_height(self.layer_height)
            .with_print_speed(self.speed)
            .with_supports(self.supports)
            .with_scale(self.scale)
    }

    fn parser_config(&self) -> ParserConfig {
        let detection = if self.strict_detection {
            FormatDetection::Strict
        } else {
            FormatDetection::Heuristic
        };
        ParserConfig::default().with_detection(detection)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.settings();
    settings.validate()?;

    let table = match &args.materials {
        Some(path) => MaterialTable::from_json(&fs::read_to_string(path)?)?,
        None => MaterialTable::reference(),
    };

    let file_name = args
        .file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file_path.display().to_string());

    let bytes = fs::read(&args.file_path)?;
    let model = ModelData::from_stl(&file_name, &bytes, &args.parser_config())?;
    let analysis = model.estimate(&settings, &table);

    tracing::info!(
        file = %file_name,
        triangles = model.triangle_count,
        "analysis complete"
    );

    let report = AnalysisReport::now(file_name, analysis, settings);

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        display_model(&model);
        display_quote(&report);
    }

    if let Some(output_path) = &args.output {
        report.write_json(BufWriter::new(File::create(output_path)?))?;
        if !args.json {
            println!();
            println!("✓ Report written to: {}", output_path.display());
        }
    }

    Ok(())
}

/// Display what was measured from the file
fn display_model(model: &ModelData) {
    let (dx, dy, dz) = model.bounding_box.size();
    println!("┌─ Model ────────────────────────────────────────────────┐");
    println!("│ File:        {:<41} │", model.file_name);
    println!("│ Size:        {:<41} │", format!("{} bytes", model.file_size_bytes));
    println!("│ Triangles:   {:<41} │", model.triangle_count);
    println!(
        "│ Dimensions:  {:<41} │",
        format!("{:.2} x {:.2} x {:.2} mm", dx, dy, dz)
    );
    println!("└────────────────────────────────────────────────────────┘");
    println!();
}

/// Display the estimate together with the settings it was made for
fn display_quote(report: &AnalysisReport) {
    let settings = &report.settings;
    println!("┌─ Settings ─────────────────────────────────────────────┐");
    println!("│ Material:    {:<41} │", settings.material);
    println!("│ Infill:      {:<41} │", format!("{}%", settings.infill_percentage));
    println!("│ Layer:       {:<41} │", format!("{} mm", settings.layer_height));
    println!("│ Speed:       {:<41} │", format!("{} mm/s", settings.print_speed));
    println!(
        "│ Supports:    {:<41} │",
        if settings.supports_enabled { "yes" } else { "no" }
    );
    println!("│ Scale:       {:<41} │", settings.scale_factor);
    println!("└────────────────────────────────────────────────────────┘");
    println!();
    println!("{}", report.analysis);
}
