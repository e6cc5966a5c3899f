//! Downloadable analysis report
//!
//! The JSON layout is consumed by the quote page and must keep its field
//! names:
//!
//! ```json
//! {
//!   "fileName": "bracket.stl",
//!   "analysis": { "volume": 12.5, "effectiveVolume": 4.4, ... },
//!   "settings": { "material": "PLA", "infillPercentage": 20, ... },
//!   "timestamp": "2024-05-01T12:00:00Z"
//! }
//! ```

use std::fmt;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{AnalysisResults, PrintSettings};

/// Analysis results bundled with the settings that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Name of the analyzed file
    pub file_name: String,
    /// Estimation results
    pub analysis: AnalysisResults,
    /// Settings used for the estimate
    pub settings: PrintSettings,
    /// When the report was generated (UTC)
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    /// Create a report with an explicit timestamp
    pub fn new(
        file_name: impl Into<String>,
        analysis: AnalysisResults,
        settings: PrintSettings,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            analysis,
            settings,
            timestamp,
        }
    }

    /// Create a report stamped with the current time
    pub fn now(
        file_name: impl Into<String>,
        analysis: AnalysisResults,
        settings: PrintSettings,
    ) -> Self {
        Self::new(file_name, analysis, settings, Utc::now())
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to a writer
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Parse a report previously written with [`write_json`](Self::write_json)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Print time as "2h 05m" or "45m"
fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "n/a".to_string();
    }
    let total = minutes.round() as u64;
    let (hours, mins) = (total / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

impl fmt::Display for AnalysisResults {
    /// Fixed-precision summary; the underlying values are not rounded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Volume:           {:.2} cm³", self.volume)?;
        writeln!(f, "Effective volume: {:.2} cm³", self.effective_volume)?;
        writeln!(f, "Support volume:   {:.2} cm³", self.support_volume)?;
        writeln!(f, "Surface area:     {:.2} cm²", self.surface_area)?;
        writeln!(f, "Weight:           {:.1} g", self.weight)?;
        writeln!(f, "Print time:       {}", format_minutes(self.print_time))?;
        writeln!(f, "Material cost:    {:.2}", self.material_cost)?;
        write!(f, "Layers:           {}", self.layer_count)
    }
}
