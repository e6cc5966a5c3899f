#![no_main]

use libfuzzer_sys::fuzz_target;
use stl_quote::{MaterialTable, PrintSettings};

fuzz_target!(|data: &[u8]| {
    // Full pipeline: decode -> measure -> estimate -> report
    if let Ok(report) = stl_quote::analyze_stl(
        "fuzz.stl",
        data,
        &PrintSettings::default(),
        &MaterialTable::reference(),
    ) {
        let _ = report.to_json_pretty();
    }
});
