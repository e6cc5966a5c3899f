#![no_main]

use libfuzzer_sys::fuzz_target;
use stl_quote::ParserConfig;

fuzz_target!(|data: &[u8]| {
    // Both detection strategies must return Ok or Err, never panic
    let _ = stl_quote::parser::parse_stl(data);
    let _ = stl_quote::parser::parse_stl_with_config(data, &ParserConfig::strict());
});
